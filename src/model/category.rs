use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The kind of reference that can be attached to a photo.
///
/// On the wire a category is a single character (`t`, `p`, `l`). In URL
/// paths and admin form fields it is spelled out (`tag`, `person`, `place`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Tag,
    Person,
    Place,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Tag, Category::Person, Category::Place];

    /// Single-character code used by the global lookup endpoint and search form
    pub fn code(self) -> char {
        match self {
            Category::Tag => 't',
            Category::Person => 'p',
            Category::Place => 'l',
        }
    }

    pub fn from_code(c: char) -> Option<Category> {
        match c {
            't' => Some(Category::Tag),
            'p' => Some(Category::Person),
            'l' => Some(Category::Place),
            _ => None,
        }
    }

    /// Path segment for `/ac/<category>` and `/adm/<category>`
    pub fn path(self) -> &'static str {
        match self {
            Category::Tag => "tag",
            Category::Person => "person",
            Category::Place => "place",
        }
    }

    /// Parse a path name or a single-character code
    pub fn parse(s: &str) -> Option<Category> {
        match s {
            "tag" | "t" => Some(Category::Tag),
            "person" | "p" => Some(Category::Person),
            "place" | "l" | "location" => Some(Category::Place),
            _ => None,
        }
    }

    /// Human title, used for form labels and the help overlay
    pub fn title(self) -> &'static str {
        match self {
            Category::Tag => "Tag",
            Category::Person => "Person",
            Category::Place => "Place",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Tag => "\u{1f3f7}",
            Category::Person => "\u{263a}",
            Category::Place => "\u{1f5fa}",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.code())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Category::from_code(c),
            _ => None,
        }
        .ok_or_else(|| serde::de::Error::custom(format!("unknown category code: {:?}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_and_path_agree() {
        for cat in Category::ALL {
            assert_eq!(Category::from_code(cat.code()), Some(cat));
            assert_eq!(Category::parse(cat.path()), Some(cat));
        }
    }

    #[test]
    fn place_is_keyed_by_l() {
        assert_eq!(Category::Place.code(), 'l');
        assert_eq!(Category::parse("location"), Some(Category::Place));
        assert_eq!(Category::from_code('x'), None);
    }

    #[test]
    fn serde_uses_single_char_code() {
        let json = serde_json::to_string(&Category::Person).unwrap();
        assert_eq!(json, "\"p\"");
        let cat: Category = serde_json::from_str("\"l\"").unwrap();
        assert_eq!(cat, Category::Place);
        assert!(serde_json::from_str::<Category>("\"tag\"").is_err());
    }
}
