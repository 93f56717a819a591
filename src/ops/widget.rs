//! The autocomplete-and-attach widget as an explicit state machine.
//!
//! One `WidgetState` exists per widget instance (query input + suggestion
//! list). All input, navigation and network results go through
//! [`WidgetState::dispatch`], which mutates the state and returns the side
//! effects for the host to perform. Nothing here touches the terminal or
//! the network, so every transition is testable in isolation.

use tracing::{debug, warn};

use super::suggest_list::{Direction, Focus, SuggestionList};
use crate::model::{LookupScope, Suggestion};

/// Per-instance configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetConfig {
    pub scope: LookupScope,
    /// Queries shorter than this (in chars) clear the list instead of fetching
    pub min_len: usize,
}

/// Keys with widget-local meaning; they never trigger a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Escape,
    Enter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    Insert(char),
    Backspace,
    /// Replace the whole text (paste)
    SetText(String),
    Nav(NavKey),
    /// Any key with no meaning to the widget
    Other,
    /// Pointer-style selection of a list item
    Select(usize),
    /// Lookup response for request `seq`
    Results { seq: u64, suggestions: Vec<Suggestion> },
    /// Lookup for request `seq` failed (network, timeout or bad JSON)
    LookupFailed { seq: u64, reason: String },
    /// The owning form is going away
    Cancel,
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Issue one lookup for `query`, tagged `seq`
    Fetch { seq: u64, query: String },
    /// Commit the suggestion into the owning form
    Attach(Suggestion),
    /// Close the owning form and give focus back to its trigger
    CloseForm,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    /// The key was consumed; the host must not act on it
    pub handled: bool,
    pub effects: Vec<Effect>,
}

impl Outcome {
    fn handled() -> Self {
        Outcome {
            handled: true,
            effects: Vec::new(),
        }
    }

    fn passed() -> Self {
        Outcome::default()
    }

    fn with(effect: Effect) -> Self {
        Outcome {
            handled: true,
            effects: vec![effect],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetState {
    config: WidgetConfig,
    text: String,
    list: SuggestionList,
    focus: Focus,
    /// Sequence number of the newest request whose result may still apply.
    /// Bumped on every issued lookup and on every action that must discard
    /// in-flight results.
    seq: u64,
}

impl WidgetState {
    pub fn new(config: WidgetConfig) -> Self {
        WidgetState {
            config,
            text: String::new(),
            list: SuggestionList::new(),
            focus: Focus::OnInput,
            seq: 0,
        }
    }

    pub fn config(&self) -> WidgetConfig {
        self.config
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn list(&self) -> &SuggestionList {
        &self.list
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The suggestion under focus, if any
    pub fn focused(&self) -> Option<&Suggestion> {
        match self.focus {
            Focus::OnListItem(i) => self.list.get(i),
            Focus::OnInput => None,
        }
    }

    pub fn dispatch(&mut self, event: WidgetEvent) -> Outcome {
        match event {
            WidgetEvent::Insert(c) => {
                if self.on_list_item() {
                    return Outcome::handled();
                }
                let mut text = self.text.clone();
                text.push(c);
                self.text_changed(text)
            }
            WidgetEvent::Backspace => {
                if self.on_list_item() {
                    return Outcome::handled();
                }
                let mut text = self.text.clone();
                crate::util::text::pop_grapheme(&mut text);
                self.text_changed(text)
            }
            WidgetEvent::SetText(text) => {
                self.focus = Focus::OnInput;
                self.text_changed(text)
            }
            WidgetEvent::Nav(NavKey::Down) => self.navigate(Direction::Next),
            WidgetEvent::Nav(NavKey::Up) => self.navigate(Direction::Previous),
            WidgetEvent::Nav(NavKey::Escape) => self.escape(),
            WidgetEvent::Nav(NavKey::Enter) => match self.focus {
                Focus::OnListItem(i) => self.commit(i),
                Focus::OnInput => Outcome::passed(),
            },
            WidgetEvent::Other => {
                if self.on_list_item() {
                    Outcome::handled()
                } else {
                    Outcome::passed()
                }
            }
            WidgetEvent::Select(i) => self.commit(i),
            WidgetEvent::Results { seq, suggestions } => {
                if seq != self.seq {
                    debug!(seq, current = self.seq, "dropping stale lookup result");
                    return Outcome::passed();
                }
                self.list.show(suggestions);
                self.focus = Focus::OnInput;
                Outcome::passed()
            }
            WidgetEvent::LookupFailed { seq, reason } => {
                if seq != self.seq {
                    return Outcome::passed();
                }
                warn!(seq, reason = reason.as_str(), "lookup failed, clearing suggestions");
                self.list.clear();
                self.focus = Focus::OnInput;
                Outcome::passed()
            }
            WidgetEvent::Cancel => {
                self.invalidate();
                self.text.clear();
                self.list.clear();
                self.focus = Focus::OnInput;
                Outcome::passed()
            }
        }
    }

    /// Drop the list and any lookup in flight, keeping the typed text.
    /// Used when the owning form is hidden rather than torn down.
    pub fn suspend(&mut self) {
        self.invalidate();
        self.list.clear();
        self.focus = Focus::OnInput;
    }

    fn on_list_item(&self) -> bool {
        matches!(self.focus, Focus::OnListItem(_)) && !self.list.is_empty()
    }

    fn invalidate(&mut self) {
        self.seq += 1;
    }

    fn text_changed(&mut self, text: String) -> Outcome {
        if text == self.text {
            return Outcome::handled();
        }
        self.text = text;
        self.invalidate();
        if self.text.chars().count() >= self.config.min_len.max(1) {
            Outcome::with(Effect::Fetch {
                seq: self.seq,
                query: self.text.clone(),
            })
        } else {
            self.list.clear();
            self.focus = Focus::OnInput;
            Outcome::handled()
        }
    }

    fn navigate(&mut self, direction: Direction) -> Outcome {
        match self.list.item_at(direction, self.focus) {
            Some(next) => {
                self.focus = next;
                Outcome::handled()
            }
            None => Outcome::passed(),
        }
    }

    fn escape(&mut self) -> Outcome {
        if !self.list.is_empty() {
            self.invalidate();
            self.list.clear();
            self.focus = Focus::OnInput;
            Outcome::handled()
        } else if !self.text.is_empty() {
            self.invalidate();
            self.text.clear();
            self.focus = Focus::OnInput;
            Outcome::handled()
        } else {
            self.invalidate();
            Outcome::with(Effect::CloseForm)
        }
    }

    fn commit(&mut self, idx: usize) -> Outcome {
        let Some(selected) = self.list.get(idx).cloned() else {
            return Outcome::passed();
        };
        self.invalidate();
        self.text.clear();
        self.list.clear();
        self.focus = Focus::OnInput;
        Outcome::with(Effect::Attach(selected))
    }
}
