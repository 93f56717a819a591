use crate::io::http::Rotation;
use crate::model::Category;

/// The admin button row of the detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    RotateLeft,
    RotateRight,
    Tag,
    Person,
    Location,
    Grade,
}

impl Control {
    pub const ALL: [Control; 6] = [
        Control::RotateLeft,
        Control::RotateRight,
        Control::Tag,
        Control::Person,
        Control::Location,
        Control::Grade,
    ];

    pub fn icon(self) -> &'static str {
        match self {
            Control::RotateLeft => "\u{27f2}",
            Control::RotateRight => "\u{27f3}",
            Control::Tag => Category::Tag.icon(),
            Control::Person => Category::Person.icon(),
            Control::Location => "\u{1f5fa}",
            Control::Grade => "\u{2606}",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Control::RotateLeft => "Rotate left",
            Control::RotateRight => "Rotate right",
            Control::Tag => "Tag",
            Control::Person => "Person",
            Control::Location => "Location",
            Control::Grade => "Grade",
        }
    }

    /// Single-key binding
    pub fn key(self) -> char {
        match self {
            Control::RotateLeft => '<',
            Control::RotateRight => '>',
            Control::Tag => 't',
            Control::Person => 'p',
            Control::Location => 'l',
            Control::Grade => 'g',
        }
    }

    pub fn from_key(c: char) -> Option<Control> {
        Control::ALL.into_iter().find(|ctl| ctl.key() == c)
    }

    pub fn rotation(self) -> Option<Rotation> {
        match self {
            Control::RotateLeft => Some(Rotation::Left),
            Control::RotateRight => Some(Rotation::Right),
            _ => None,
        }
    }

    /// Tag-like controls open an autocomplete form for this category
    pub fn category(self) -> Option<Category> {
        match self {
            Control::Tag => Some(Category::Tag),
            Control::Person => Some(Category::Person),
            _ => None,
        }
    }
}

/// Keys bound outside the admin row
pub const GLOBAL_KEYS: [(char, &str); 5] = [
    ('/', "Search"),
    ('r', "Reload"),
    ('z', "Zoom"),
    ('?', "Help"),
    ('q', "Quit"),
];

/// Selection and disabled state of the button row. A form's trigger stays
/// disabled while the form is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonRow {
    pub selected: usize,
    disabled: Option<Control>,
}

impl ButtonRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_control(&self) -> Control {
        Control::ALL[self.selected.min(Control::ALL.len() - 1)]
    }

    pub fn select_next(&mut self, forward: bool) {
        let n = Control::ALL.len();
        self.selected = if forward {
            (self.selected + 1) % n
        } else {
            (self.selected + n - 1) % n
        };
    }

    pub fn disable(&mut self, control: Control) {
        self.disabled = Some(control);
    }

    pub fn is_disabled(&self, control: Control) -> bool {
        self.disabled == Some(control)
    }

    /// Re-enable the disabled trigger and move the selection onto it.
    pub fn restore(&mut self) -> Option<Control> {
        let control = self.disabled.take()?;
        if let Some(idx) = Control::ALL.iter().position(|c| *c == control) {
            self.selected = idx;
        }
        Some(control)
    }
}

/// Every key bound by a control currently shown, admin row first
pub fn bindings(admin_visible: bool) -> Vec<(char, &'static str)> {
    let mut out = Vec::new();
    if admin_visible {
        out.extend(Control::ALL.iter().map(|c| (c.key(), c.title())));
    }
    out.extend(GLOBAL_KEYS);
    out
}

/// Help overlay lines, `<key>: <title>`
pub fn help_lines(admin_visible: bool) -> Vec<String> {
    bindings(admin_visible)
        .into_iter()
        .map(|(k, t)| format!("{k}: {t}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<char> = Control::ALL.iter().map(|c| c.key()).collect();
        keys.extend(GLOBAL_KEYS.iter().map(|(k, _)| *k));
        let n = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), n);
    }

    #[test]
    fn from_key_finds_forms() {
        assert_eq!(Control::from_key('t'), Some(Control::Tag));
        assert_eq!(Control::from_key('g'), Some(Control::Grade));
        assert_eq!(Control::from_key('x'), None);
        assert_eq!(Control::Person.category(), Some(Category::Person));
        assert_eq!(Control::RotateLeft.rotation(), Some(Rotation::Left));
    }

    #[test]
    fn restore_refocuses_trigger() {
        let mut row = ButtonRow::new();
        row.disable(Control::Location);
        assert!(row.is_disabled(Control::Location));
        assert!(!row.is_disabled(Control::Tag));
        assert_eq!(row.restore(), Some(Control::Location));
        assert_eq!(row.selected_control(), Control::Location);
        assert!(!row.is_disabled(Control::Location));
        assert_eq!(row.restore(), None);
    }

    #[test]
    fn help_without_admin_row() {
        insta::assert_snapshot!(help_lines(false).join("\n"), @r"
        /: Search
        r: Reload
        z: Zoom
        ?: Help
        q: Quit
        ");
    }

    #[test]
    fn help_lists_admin_keys_first() {
        let lines = help_lines(true);
        assert_eq!(lines[2], "t: Tag");
        assert_eq!(lines.len(), 11);
    }
}
