use serde::Serialize;

use crate::model::{LatLng, PhotoDetails, Suggestion};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct DetailsJson {
    pub imgid: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<LatLng>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub group: Vec<GroupPointJson>,
    pub meta: Vec<String>,
}

#[derive(Serialize)]
pub struct GroupPointJson {
    pub href: String,
    pub position: LatLng,
}

#[derive(Serialize)]
pub struct SuggestionJson {
    pub text: String,
    pub kind: &'static str,
    pub target: String,
}

#[derive(Serialize)]
pub struct PositionJson {
    pub lat: f64,
    pub lng: f64,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn details_to_json(details: &PhotoDetails) -> DetailsJson {
    DetailsJson {
        imgid: details.imgid,
        title: details.title.clone(),
        grade: details.grade,
        position: details.position,
        group: details
            .positions
            .iter()
            .map(|p| GroupPointJson {
                href: p.href(),
                position: p.pos,
            })
            .collect(),
        meta: details.meta.clone(),
    }
}

pub fn suggestion_to_json(s: &Suggestion) -> SuggestionJson {
    SuggestionJson {
        text: s.text.clone(),
        kind: s.kind.path(),
        target: s.target.clone(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Human-readable lines for `dr show`
pub fn format_details(details: &PhotoDetails) -> Vec<String> {
    let mut lines = Vec::new();
    let id = details
        .imgid
        .map(|id| id.to_string())
        .unwrap_or_else(|| "?".into());
    match &details.title {
        Some(title) => lines.push(format!("/img/{id}  {title}")),
        None => lines.push(format!("/img/{id}")),
    }
    match details.grade {
        Some(g) => lines.push(format!("  grade: {g}")),
        None => lines.push("  grade: -".into()),
    }
    if let Some(pos) = details.position {
        lines.push(format!("  position: {pos}"));
    }
    for point in &details.positions {
        lines.push(format!("  {}  {}", point.href(), point.pos));
    }
    for meta in &details.meta {
        lines.push(format!("  {meta}"));
    }
    lines
}

/// One suggestion per line; global results carry their kind
pub fn format_suggestion(s: &Suggestion, with_kind: bool) -> String {
    if with_kind {
        format!("{} ({})\t{}", s.text, s.kind, s.target)
    } else {
        s.text.clone()
    }
}
