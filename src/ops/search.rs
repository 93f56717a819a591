use crate::model::{FieldNaming, LookupScope, RefSet};
use crate::ops::attach::{Applied, apply_effects};
use crate::ops::widget::{NavKey, WidgetConfig, WidgetEvent, WidgetState};

/// The global search form: a mixed tag/person/place autocomplete whose
/// attached references narrow the search. Hidden until opened.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchForm {
    pub widget: WidgetState,
    pub refs: RefSet,
    visible: bool,
}

impl SearchForm {
    pub fn new(min_len: usize) -> Self {
        SearchForm {
            widget: WidgetState::new(WidgetConfig {
                scope: LookupScope::Global,
                min_len,
            }),
            refs: RefSet::new(),
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the form. Lookups still in flight are discarded; the text stays.
    pub fn hide(&mut self) {
        self.visible = false;
        self.widget.suspend();
    }

    /// Like the admin widget, except `Escape` with no list hides the form
    /// right away and keeps the typed text.
    pub fn dispatch(&mut self, event: WidgetEvent) -> (bool, Applied) {
        if event == WidgetEvent::Nav(NavKey::Escape) && self.widget.list().is_empty() {
            self.hide();
            return (true, Applied::default());
        }
        let outcome = self.widget.dispatch(event);
        let applied = apply_effects(&mut self.refs, outcome.effects);
        if applied.close {
            self.hide();
        }
        (outcome.handled, applied)
    }

    /// `q` followed by one `t`/`p`/`l` field per checked reference
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![("q".to_string(), self.widget.text().to_string())];
        fields.extend(self.refs.fields(FieldNaming::Code));
        fields
    }

    pub fn query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(self.fields())
    }

    /// Full URL of the server-side search page
    pub fn search_url(&self, origin: &str) -> Result<String, serde_urlencoded::ser::Error> {
        Ok(format!(
            "{}/search/?{}",
            origin.trim_end_matches('/'),
            self.query_string()?
        ))
    }
}
