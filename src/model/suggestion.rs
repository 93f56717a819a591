use serde::{Deserialize, Serialize};

use super::category::Category;

/// One candidate completion returned by a lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Display text
    pub text: String,
    pub kind: Category,
    /// Slug or name the server expects when the suggestion is submitted
    pub target: String,
}

impl Suggestion {
    pub fn new(kind: Category, text: impl Into<String>, target: impl Into<String>) -> Self {
        Suggestion {
            text: text.into(),
            kind,
            target: target.into(),
        }
    }

    /// A category-scoped suggestion: the server only sends names, and the
    /// name is what the admin endpoint accepts.
    pub fn named(kind: Category, name: impl Into<String>) -> Self {
        let name = name.into();
        Suggestion {
            target: name.clone(),
            text: name,
            kind,
        }
    }
}

/// Entry of the global `/ac` response: `{"t": title, "k": kind, "s": slug}`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub t: String,
    pub k: Category,
    pub s: String,
}

impl From<SearchHit> for Suggestion {
    fn from(hit: SearchHit) -> Self {
        Suggestion::new(hit.k, hit.t, hit.s)
    }
}

/// Which lookup endpoint a widget queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupScope {
    /// `/ac?q=`: tags, people and places mixed
    Global,
    /// `/ac/<category>?q=`: names of one category
    Category(Category),
}

impl LookupScope {
    pub fn path(self) -> String {
        match self {
            LookupScope::Global => "/ac".to_string(),
            LookupScope::Category(c) => format!("/ac/{}", c.path()),
        }
    }

    /// Decode a response body for this scope, preserving server order.
    pub fn decode(self, body: &str) -> Result<Vec<Suggestion>, serde_json::Error> {
        match self {
            LookupScope::Global => {
                let hits: Vec<SearchHit> = serde_json::from_str(body)?;
                Ok(hits.into_iter().map(Suggestion::from).collect())
            }
            LookupScope::Category(c) => {
                let names: Vec<String> = serde_json::from_str(body)?;
                Ok(names.into_iter().map(|n| Suggestion::named(c, n)).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_category_names_keeps_order() {
        let scope = LookupScope::Category(Category::Person);
        let got = scope.decode(r#"["Parker", "Paris"]"#).unwrap();
        assert_eq!(
            got,
            vec![
                Suggestion::named(Category::Person, "Parker"),
                Suggestion::named(Category::Person, "Paris"),
            ]
        );
    }

    #[test]
    fn decode_global_hits() {
        let body = r#"[
            {"t": "Stockholm", "k": "l", "s": "stockholm"},
            {"t": "Sten", "k": "p", "s": "sten"},
            {"t": "stairs", "k": "t", "s": "stairs"}
        ]"#;
        let got = LookupScope::Global.decode(body).unwrap();
        assert_eq!(got.len(), 3);
        assert_eq!(got[0], Suggestion::new(Category::Place, "Stockholm", "stockholm"));
        assert_eq!(got[1].kind, Category::Person);
        assert_eq!(got[2].target, "stairs");
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        assert!(LookupScope::Global.decode(r#"["plain"]"#).is_err());
        assert!(LookupScope::Category(Category::Tag).decode("<html>").is_err());
    }

    #[test]
    fn scope_paths() {
        assert_eq!(LookupScope::Global.path(), "/ac");
        assert_eq!(LookupScope::Category(Category::Tag).path(), "/ac/tag");
    }
}
