//! Admin forms opened from the detail view's button row.

use crate::io::store::{ScratchStore, StoreError};
use crate::model::{Category, FieldNaming, LatLng, LookupScope, RefSet};
use crate::ops::attach::{Applied, apply_effects};
use crate::ops::map::{SINGLE_ZOOM, Viewport};
use crate::ops::widget::{WidgetConfig, WidgetEvent, WidgetState};

pub const DEFAULT_GRADE: u8 = 50;

/// A completed admin form, ready to post
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Attach { category: Category, values: Vec<String> },
    Grade(u8),
    Locate(LatLng),
}

/// Tag or person form: one autocomplete widget plus attached references.
#[derive(Debug, Clone, PartialEq)]
pub struct TagForm {
    pub category: Category,
    pub widget: WidgetState,
    pub refs: RefSet,
}

impl TagForm {
    pub fn new(category: Category, min_len: usize) -> Self {
        TagForm {
            category,
            widget: WidgetState::new(WidgetConfig {
                scope: LookupScope::Category(category),
                min_len,
            }),
            refs: RefSet::new(),
        }
    }

    /// Route an event through the widget; returns whether the widget
    /// consumed it and what the host still has to do.
    pub fn dispatch(&mut self, event: WidgetEvent) -> (bool, Applied) {
        let outcome = self.widget.dispatch(event);
        (outcome.handled, apply_effects(&mut self.refs, outcome.effects))
    }

    /// Checked references followed by the typed text. `None` when there is
    /// nothing to send.
    pub fn submission(&self) -> Option<Submission> {
        let mut values: Vec<String> = self
            .refs
            .fields(FieldNaming::Path)
            .into_iter()
            .map(|(_, v)| v)
            .collect();
        let typed = self.widget.text().trim();
        if !typed.is_empty() && !values.iter().any(|v| v == typed) {
            values.push(typed.to_string());
        }
        if values.is_empty() {
            return None;
        }
        Some(Submission::Attach {
            category: self.category,
            values,
        })
    }

    pub fn cancel(&mut self) {
        self.widget.dispatch(WidgetEvent::Cancel);
    }
}

/// 0-100 slider seeded from the photo's current grade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeForm {
    pub value: u8,
}

impl GradeForm {
    pub fn new(current: Option<u8>) -> Self {
        GradeForm {
            value: current.unwrap_or(DEFAULT_GRADE).min(100),
        }
    }

    pub fn step(&mut self, delta: i16) {
        self.value = (self.value as i16 + delta).clamp(0, 100) as u8;
    }

    pub fn submission(&self) -> Submission {
        Submission::Grade(self.value)
    }
}

/// Where the location form got its initial marker from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seed {
    Photo,
    LastPosition,
    World,
}

/// Marker placement on a small map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocateForm {
    pub marker: LatLng,
    pub viewport: Viewport,
    pub seed: Seed,
}

impl LocateForm {
    /// Seed from the photo's position, else the last submitted position,
    /// else the whole world centered on `[0, 0]`.
    pub fn open(position: Option<LatLng>, last: Option<LatLng>) -> Self {
        let (marker, seed) = match (position, last) {
            (Some(p), _) => (p.normalized(), Seed::Photo),
            (None, Some(p)) => (p.normalized(), Seed::LastPosition),
            (None, None) => (LatLng::ORIGIN, Seed::World),
        };
        let viewport = match seed {
            Seed::World => Viewport::world(),
            _ => Viewport::new(marker, SINGLE_ZOOM),
        };
        LocateForm {
            marker,
            viewport,
            seed,
        }
    }

    /// Move the marker by whole steps north (`dlat`) and east (`dlng`).
    /// A step is `fraction` of the visible span, so it shrinks with zoom.
    pub fn nudge(&mut self, dlat: i8, dlng: i8, fraction: f64) {
        let (w, h) = self.viewport.span();
        self.marker = LatLng::new(
            self.marker.lat + h * fraction * dlat as f64,
            self.marker.lng + w * fraction * dlng as f64,
        )
        .normalized();
        self.viewport.pan_to_include(self.marker);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
        self.viewport.center = self.marker;
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Remember the marker for the next form, then hand out the submission.
    pub fn submit(&self, store: &mut ScratchStore) -> Result<Submission, StoreError> {
        store.remember_position(self.marker)?;
        Ok(Submission::Locate(self.marker))
    }
}

/// The one admin form that may be open at a time
#[derive(Debug, Clone, PartialEq)]
pub enum AdminForm {
    Tag(TagForm),
    Grade(GradeForm),
    Locate(LocateForm),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Suggestion;
    use crate::ops::widget::NavKey;
    use pretty_assertions::assert_eq;

    #[test]
    fn person_form_attaches_paris() {
        let mut form = TagForm::new(Category::Person, 1);
        for c in "par".chars() {
            form.dispatch(WidgetEvent::Insert(c));
        }
        let seq = form.widget.seq();
        form.dispatch(WidgetEvent::Results {
            seq,
            suggestions: vec![
                Suggestion::named(Category::Person, "Parker"),
                Suggestion::named(Category::Person, "Paris"),
            ],
        });
        assert_eq!(form.widget.list().len(), 2);
        form.dispatch(WidgetEvent::Nav(NavKey::Down));
        form.dispatch(WidgetEvent::Nav(NavKey::Down));
        let (handled, applied) = form.dispatch(WidgetEvent::Nav(NavKey::Enter));
        assert!(handled);
        assert!(!applied.close);

        let r: Vec<_> = form.refs.iter().collect();
        assert_eq!(r[0].kind, Category::Person);
        assert_eq!(r[0].label, "Paris");
        assert_eq!(
            form.submission(),
            Some(Submission::Attach {
                category: Category::Person,
                values: vec!["Paris".to_string()],
            })
        );
    }

    #[test]
    fn unchecked_reference_is_not_submitted() {
        let mut form = TagForm::new(Category::Tag, 1);
        form.refs
            .attach(crate::model::AttachedReference::from_suggestion(
                &Suggestion::named(Category::Tag, "sunset"),
            ));
        form.refs.toggle(0);
        assert_eq!(form.submission(), None);
    }

    #[test]
    fn typed_text_is_submitted_after_references() {
        let mut form = TagForm::new(Category::Tag, 1);
        form.refs
            .attach(crate::model::AttachedReference::from_suggestion(
                &Suggestion::named(Category::Tag, "sea"),
            ));
        form.dispatch(WidgetEvent::SetText(" beach ".to_string()));
        assert_eq!(
            form.submission(),
            Some(Submission::Attach {
                category: Category::Tag,
                values: vec!["sea".to_string(), "beach".to_string()],
            })
        );
    }

    #[test]
    fn grade_steps_are_clamped() {
        let mut g = GradeForm::new(None);
        assert_eq!(g.value, 50);
        g.step(10);
        g.step(1);
        assert_eq!(g.value, 61);
        g.step(100);
        assert_eq!(g.value, 100);
        g.step(-200);
        assert_eq!(g.value, 0);
        assert_eq!(GradeForm::new(Some(150)).value, 100);
    }

    #[test]
    fn location_seed_order() {
        let photo = LatLng::new(1.0, 2.0);
        let last = LatLng::new(59.3, 18.1);
        assert_eq!(LocateForm::open(Some(photo), Some(last)).seed, Seed::Photo);
        let f = LocateForm::open(None, Some(last));
        assert_eq!(f.seed, Seed::LastPosition);
        assert_eq!(f.marker, last);
        assert_eq!(f.viewport.zoom, SINGLE_ZOOM);
        let w = LocateForm::open(None, None);
        assert_eq!(w.marker, LatLng::ORIGIN);
        assert_eq!(w.viewport, Viewport::world());
    }

    #[test]
    fn nudge_moves_by_view_fraction() {
        let mut f = LocateForm::open(None, None);
        f.nudge(1, -1, 0.05);
        assert!((f.marker.lat - 9.0).abs() < 1e-9);
        assert!((f.marker.lng + 18.0).abs() < 1e-9);
    }

    #[test]
    fn far_out_seed_is_wrapped_before_nudging() {
        let mut f = LocateForm::open(Some(LatLng::new(10.0, 1e20)), None);
        assert!(f.marker.is_valid(), "{:?}", f.marker);
        f.nudge(0, 1, 0.05);
        assert!(f.marker.is_valid(), "{:?}", f.marker);
    }

    #[test]
    fn submit_remembers_last_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut store = ScratchStore::open(&path);
        let form = LocateForm::open(None, Some(LatLng::new(59.3, 18.1)));
        assert_eq!(
            form.submit(&mut store).unwrap(),
            Submission::Locate(LatLng::new(59.3, 18.1))
        );
        assert_eq!(store.get_item("lastpos"), Some("[59.3,18.1]"));

        let reopened = ScratchStore::open(&path);
        let next = LocateForm::open(None, reopened.last_position());
        assert_eq!(next.marker, LatLng::new(59.3, 18.1));
    }
}
