use crate::model::Suggestion;

/// Where keyboard focus sits within one widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    OnInput,
    OnListItem(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// The floating suggestion list of one widget instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionList {
    items: Vec<Suggestion>,
}

impl SuggestionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents. An empty sequence leaves the list cleared.
    pub fn show(&mut self, suggestions: Vec<Suggestion>) {
        self.items = suggestions;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    pub fn get(&self, idx: usize) -> Option<&Suggestion> {
        self.items.get(idx)
    }

    /// The element to focus when moving `direction` from `from`, wrapping
    /// around both ends. Moving from the input enters the list at the near
    /// end for `Next` and the far end for `Previous`. `None` when empty.
    pub fn item_at(&self, direction: Direction, from: Focus) -> Option<Focus> {
        let last = self.items.len().checked_sub(1)?;
        let idx = match (direction, from) {
            (Direction::Next, Focus::OnInput) => 0,
            (Direction::Next, Focus::OnListItem(i)) if i >= last => 0,
            (Direction::Next, Focus::OnListItem(i)) => i + 1,
            (Direction::Previous, Focus::OnInput) => last,
            (Direction::Previous, Focus::OnListItem(0)) => last,
            (Direction::Previous, Focus::OnListItem(i)) => (i - 1).min(last),
        };
        Some(Focus::OnListItem(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn abc() -> SuggestionList {
        let mut list = SuggestionList::new();
        list.show(
            ["A", "B", "C"]
                .iter()
                .map(|n| Suggestion::named(Category::Tag, *n))
                .collect(),
        );
        list
    }

    #[test]
    fn next_from_input_is_first() {
        assert_eq!(
            abc().item_at(Direction::Next, Focus::OnInput),
            Some(Focus::OnListItem(0))
        );
    }

    #[test]
    fn previous_from_input_is_last() {
        assert_eq!(
            abc().item_at(Direction::Previous, Focus::OnInput),
            Some(Focus::OnListItem(2))
        );
    }

    #[test]
    fn wraps_at_both_ends() {
        let list = abc();
        assert_eq!(
            list.item_at(Direction::Next, Focus::OnListItem(2)),
            Some(Focus::OnListItem(0))
        );
        assert_eq!(
            list.item_at(Direction::Previous, Focus::OnListItem(0)),
            Some(Focus::OnListItem(2))
        );
        assert_eq!(
            list.item_at(Direction::Previous, Focus::OnListItem(2)),
            Some(Focus::OnListItem(1))
        );
    }

    #[test]
    fn empty_list_has_nothing_to_focus() {
        let list = SuggestionList::new();
        assert_eq!(list.item_at(Direction::Next, Focus::OnInput), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut list = abc();
        list.clear();
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn stale_focus_index_snaps_into_range() {
        let list = abc();
        assert_eq!(
            list.item_at(Direction::Next, Focus::OnListItem(9)),
            Some(Focus::OnListItem(0))
        );
        assert_eq!(
            list.item_at(Direction::Previous, Focus::OnListItem(9)),
            Some(Focus::OnListItem(2))
        );
    }
}
