use serde::Serialize;

use super::category::Category;
use super::suggestion::Suggestion;

/// A committed tag/person/place shown as a checkbox in its owning form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachedReference {
    pub kind: Category,
    pub target: String,
    pub label: String,
    /// Unchecked references stay visible but are left out of the submission
    pub checked: bool,
}

impl AttachedReference {
    pub fn from_suggestion(s: &Suggestion) -> Self {
        AttachedReference {
            kind: s.kind,
            target: s.target.clone(),
            label: s.text.clone(),
            checked: true,
        }
    }
}

/// How a form names the submitted reference fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldNaming {
    /// `t=slug`, `p=slug`, `l=slug` (search form)
    Code,
    /// `tag=name`, `person=name` (admin forms)
    Path,
}

/// The reference container of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefSet {
    refs: Vec<AttachedReference>,
    /// Cursor for toggling checkboxes from the keyboard
    pub cursor: usize,
}

impl RefSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reference. Attaching the same kind+target twice re-checks
    /// the existing entry instead of adding a duplicate.
    pub fn attach(&mut self, reference: AttachedReference) {
        if let Some(existing) = self
            .refs
            .iter_mut()
            .find(|r| r.kind == reference.kind && r.target == reference.target)
        {
            existing.checked = true;
            return;
        }
        self.refs.push(reference);
    }

    pub fn toggle(&mut self, idx: usize) {
        if let Some(r) = self.refs.get_mut(idx) {
            r.checked = !r.checked;
        }
    }

    pub fn toggle_at_cursor(&mut self) {
        self.toggle(self.cursor);
    }

    pub fn move_cursor(&mut self, forward: bool) {
        if self.refs.is_empty() {
            self.cursor = 0;
            return;
        }
        let last = self.refs.len() - 1;
        self.cursor = if forward {
            if self.cursor >= last { 0 } else { self.cursor + 1 }
        } else if self.cursor == 0 {
            last
        } else {
            self.cursor - 1
        };
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttachedReference> {
        self.refs.iter()
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Checked references as form fields, in attachment order
    pub fn fields(&self, naming: FieldNaming) -> Vec<(String, String)> {
        self.refs
            .iter()
            .filter(|r| r.checked)
            .map(|r| {
                let name = match naming {
                    FieldNaming::Code => r.kind.code().to_string(),
                    FieldNaming::Path => r.kind.path().to_string(),
                };
                (name, r.target.clone())
            })
            .collect()
    }
}
