use crate::model::{AttachedReference, RefSet, Suggestion};
use crate::ops::widget::Effect;

/// What is left for the host after a form has absorbed widget effects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    /// Lookups to start: `(seq, query)`
    pub fetches: Vec<(u64, String)>,
    /// The widget asked for its form to close
    pub close: bool,
}

/// Commit a selected suggestion into the form's reference container.
/// Never submits the form.
pub fn attach_suggestion(refs: &mut RefSet, suggestion: &Suggestion) {
    refs.attach(AttachedReference::from_suggestion(suggestion));
}

/// Apply widget effects to the owning form's references.
pub fn apply_effects(refs: &mut RefSet, effects: Vec<Effect>) -> Applied {
    let mut applied = Applied::default();
    for effect in effects {
        match effect {
            Effect::Fetch { seq, query } => applied.fetches.push((seq, query)),
            Effect::Attach(s) => attach_suggestion(refs, &s),
            Effect::CloseForm => applied.close = true,
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, FieldNaming, LookupScope};
    use crate::ops::widget::{NavKey, WidgetConfig, WidgetEvent, WidgetState};
    use pretty_assertions::assert_eq;

    #[test]
    fn selecting_b_attaches_checked_reference_and_resets_widget() {
        let mut refs = RefSet::new();
        let mut w = WidgetState::new(WidgetConfig {
            scope: LookupScope::Category(Category::Tag),
            min_len: 1,
        });
        let out = w.dispatch(WidgetEvent::Insert('b'));
        let applied = apply_effects(&mut refs, out.effects);
        assert_eq!(applied.fetches, vec![(1, "b".to_string())]);

        w.dispatch(WidgetEvent::Results {
            seq: 1,
            suggestions: ["A", "B", "C"]
                .iter()
                .map(|n| Suggestion::named(Category::Tag, *n))
                .collect(),
        });
        w.dispatch(WidgetEvent::Nav(NavKey::Down));
        w.dispatch(WidgetEvent::Nav(NavKey::Down));
        let out = w.dispatch(WidgetEvent::Nav(NavKey::Enter));
        let applied = apply_effects(&mut refs, out.effects);

        assert!(!applied.close);
        assert!(applied.fetches.is_empty());
        let attached: Vec<_> = refs.iter().collect();
        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0].label, "B");
        assert!(attached[0].checked);
        assert_eq!(w.text(), "");
        assert!(w.list().is_empty());
    }

    #[test]
    fn close_effect_is_reported() {
        let mut refs = RefSet::new();
        let applied = apply_effects(&mut refs, vec![Effect::CloseForm]);
        assert!(applied.close);
        assert!(refs.is_empty());
    }

    #[test]
    fn attached_place_submits_under_its_code() {
        let mut refs = RefSet::new();
        attach_suggestion(
            &mut refs,
            &Suggestion::new(Category::Place, "Paris", "paris"),
        );
        assert_eq!(
            refs.fields(FieldNaming::Code),
            vec![("l".to_string(), "paris".to_string())]
        );
    }
}
