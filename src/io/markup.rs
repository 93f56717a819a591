//! Scraping of the server-rendered detail page.
//!
//! The gallery renders everything the admin controls need as `data-*`
//! attributes on the `.details` element (and `.group` for photo groups).

use scraper::{ElementRef, Html, Selector};

use crate::model::{LatLng, MapPoint, PhotoDetails};

#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    #[error("bad selector {0}")]
    Selector(String),
    #[error("attribute {attr} is not valid: {reason}")]
    Attribute { attr: &'static str, reason: String },
}

fn selector(s: &str) -> Result<Selector, MarkupError> {
    Selector::parse(s).map_err(|e| MarkupError::Selector(format!("{}: {}", s, e)))
}

/// Parse the detail page (or a group/search page) into `PhotoDetails`.
///
/// Pages without a `.details` element still yield group positions when a
/// `.group` element carries them.
pub fn parse_details(html: &str) -> Result<PhotoDetails, MarkupError> {
    let doc = Html::parse_document(html);
    let mut details = PhotoDetails::default();

    let title_sel = selector("title")?;
    details.title = doc
        .select(&title_sel)
        .next()
        .map(|t| collapse_ws(&t.text().collect::<String>()))
        .filter(|t| !t.is_empty());

    let details_sel = selector(".details")?;
    let group_sel = selector(".group")?;
    let meta_sel = selector(".meta")?;

    if let Some(el) = doc.select(&details_sel).next() {
        details.imgid = parse_attr(el, "data-imgid", |v| v.trim().parse::<u32>().ok())?;
        details.grade = parse_attr(el, "data-grade", |v| {
            v.trim().parse::<f64>().ok().map(|g| g.clamp(0.0, 100.0).round() as u8)
        })?;
        details.position = parse_attr(el, "data-position", |v| {
            serde_json::from_str::<LatLng>(v).ok().filter(|p| p.is_valid())
        })?;
        if let Some(points) = parse_attr(el, "data-positions", |v| {
            serde_json::from_str::<Vec<MapPoint>>(v)
                .ok()
                .filter(|pts| pts.iter().all(|p| p.pos.is_valid()))
        })? {
            details.positions = points;
        }
        if let Some(meta) = el.select(&meta_sel).next() {
            details.meta = meta_lines(meta);
        }
    }

    if details.positions.is_empty()
        && let Some(group) = doc.select(&group_sel).next()
        && let Some(points) = parse_attr(group, "data-positions", |v| {
            serde_json::from_str::<Vec<MapPoint>>(v)
                .ok()
                .filter(|pts| pts.iter().all(|p| p.pos.is_valid()))
        })?
    {
        details.positions = points;
    }

    Ok(details)
}

/// Read an attribute and convert it. Absent or empty attributes are `None`;
/// present but unparseable ones are an error.
fn parse_attr<T>(
    el: ElementRef<'_>,
    attr: &'static str,
    convert: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, MarkupError> {
    match el.value().attr(attr) {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => Ok(None),
        Some(v) => convert(v).map(Some).ok_or_else(|| MarkupError::Attribute {
            attr,
            reason: format!("{:?}", v),
        }),
    }
}

fn meta_lines(meta: ElementRef<'_>) -> Vec<String> {
    let Ok(block_sel) = Selector::parse("p, li, h2, h3, dt, dd") else {
        return Vec::new();
    };
    let lines: Vec<String> = meta
        .select(&block_sel)
        .map(|p| collapse_ws(&p.text().collect::<String>()))
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        let text = collapse_ws(&meta.text().collect::<String>());
        if text.is_empty() { Vec::new() } else { vec![text] }
    } else {
        lines
    }
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DETAIL_PAGE: &str = r#"<!doctype html>
<html><head><title>Photo
  #1234</title></head>
<body>
<header><form class="search"><input name="q"></form></header>
<main>
  <div class="details" data-imgid="1234" data-grade="72" data-position="[59.3293,18.0686]">
    <div class="item"><img src="/img/1234-m.jpg"></div>
    <div class="meta">
      <p>Taken 2019-06-21 18:04</p>
      <p>People: <a href="/person/sten">Sten</a></p>
      <p>Tags: <a href="/tag/sea">sea</a>, <a href="/tag/boat">boat</a></p>
    </div>
  </div>
</main>
</body></html>"#;

    #[test]
    fn parses_single_photo_attributes() {
        let d = parse_details(DETAIL_PAGE).unwrap();
        assert_eq!(d.imgid, Some(1234));
        assert_eq!(d.grade, Some(72));
        assert_eq!(d.position, Some(LatLng::new(59.3293, 18.0686)));
        assert!(d.positions.is_empty());
        assert_eq!(d.title.as_deref(), Some("Photo #1234"));
        assert_eq!(
            d.meta,
            vec![
                "Taken 2019-06-21 18:04".to_string(),
                "People: Sten".to_string(),
                "Tags: sea, boat".to_string(),
            ]
        );
    }

    #[test]
    fn group_positions_are_used_without_details() {
        let html = r#"<main><div class="group" data-positions='[[59.3,18.1,12],[57.7,11.9,13]]'></div></main>"#;
        let d = parse_details(html).unwrap();
        assert_eq!(d.imgid, None);
        assert_eq!(d.positions.len(), 2);
        assert_eq!(d.positions[1].label, "13");
    }

    #[test]
    fn missing_attributes_are_none() {
        let d = parse_details(r#"<div class="details" data-imgid="5"></div>"#).unwrap();
        assert_eq!(d.imgid, Some(5));
        assert_eq!(d.grade, None);
        assert_eq!(d.position, None);
    }

    #[test]
    fn out_of_range_position_is_an_error() {
        let err = parse_details(r#"<div class="details" data-position="[10,1e20]"></div>"#)
            .unwrap_err();
        assert!(matches!(
            err,
            MarkupError::Attribute {
                attr: "data-position",
                ..
            }
        ));
        let err = parse_details(r#"<div class="group" data-positions='[[95,0,1]]'></div>"#)
            .unwrap_err();
        assert!(matches!(
            err,
            MarkupError::Attribute {
                attr: "data-positions",
                ..
            }
        ));
    }

    #[test]
    fn malformed_position_is_an_error() {
        let err = parse_details(r#"<div class="details" data-position="[north]"></div>"#)
            .unwrap_err();
        assert!(matches!(
            err,
            MarkupError::Attribute {
                attr: "data-position",
                ..
            }
        ));
    }
}
