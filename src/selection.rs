//! Keyboard navigation state for an open switcher.
//!
//! This module tracks the filtered window list, which input region holds
//! focus, and which row is selected. It never talks to the compositor; it
//! only reports what the caller should do next.

use crate::filter::filter_windows;
use crate::window::Window;
use tracing::debug;

/// UI region that currently receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusRegion {
    SearchField,
    List,
}

/// Keys the controller understands. Everything else goes to the text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Enter,
    Right,
    Escape,
}

/// What the caller should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Key not handled, let the default handler have it
    Ignored,
    /// Key handled, state may have changed
    Consumed,
    Activate(Window),
    Dismiss,
}

/// Owns the filter and selection state during one switcher session.
pub struct SelectionController {
    windows: Vec<Window>,
    query: String,
    ordered: Vec<Window>,
    focus: FocusRegion,
    selected: Option<usize>,
    revision: u64,
}

impl SelectionController {
    /// Start with the full list shown and the search field focused.
    pub fn new(windows: Vec<Window>) -> Self {
        SelectionController {
            ordered: windows.clone(),
            windows,
            query: String::new(),
            focus: FocusRegion::SearchField,
            selected: None,
            revision: 0,
        }
    }

    /// The full, unfiltered window list.
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The filtered list in display order.
    pub fn ordered(&self) -> &[Window] {
        &self.ordered
    }

    pub fn focus_region(&self) -> FocusRegion {
        self.focus
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Get the currently selected window, if any.
    pub fn selected(&self) -> Option<&Window> {
        self.selected.and_then(|i| self.ordered.get(i))
    }

    /// Incremented every time `ordered` is recomputed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Recompute the filtered list for a new query.
    pub fn on_query_changed(&mut self, query: &str) {
        self.query = query.to_string();
        self.ordered = filter_windows(&self.windows, query);
        self.revision += 1;

        self.selected = match self.focus {
            FocusRegion::List => self.first_index(),
            FocusRegion::SearchField => None,
        };

        debug!(
            "Query {:?} matched {} of {} windows",
            self.query,
            self.ordered.len(),
            self.windows.len()
        );
    }

    /// Handle a navigation key.
    pub fn on_key(&mut self, key: NavKey) -> Action {
        if key == NavKey::Escape {
            return Action::Dismiss;
        }

        match self.focus {
            FocusRegion::SearchField => self.on_search_field_key(key),
            FocusRegion::List => self.on_list_key(key),
        }
    }

    /// Activate the row at `index` directly, regardless of focus or selection.
    pub fn on_row_activated(&self, index: usize) -> Action {
        match self.ordered.get(index) {
            Some(window) => Action::Activate(window.clone()),
            None => Action::Ignored,
        }
    }

    /// Keep focus tracking in sync when the presenter moves focus itself
    /// (pointer clicks, Tab traversal).
    pub fn on_focus_changed(&mut self, region: FocusRegion) {
        if region == self.focus {
            return;
        }

        debug!("Focus moved to {:?}", region);
        self.focus = region;
        if region == FocusRegion::SearchField {
            self.selected = None;
        }
    }

    fn on_search_field_key(&mut self, key: NavKey) -> Action {
        let target = match key {
            NavKey::Down => self.first_index(),
            // Up from the search box wraps to the bottom of the list
            NavKey::Up => self.last_index(),
            _ => return Action::Ignored,
        };

        if let Some(index) = target {
            self.focus = FocusRegion::List;
            self.selected = Some(index);
        }
        Action::Consumed
    }

    fn on_list_key(&mut self, key: NavKey) -> Action {
        match key {
            NavKey::Up => {
                match self.selected {
                    Some(index) if index > 0 => self.selected = Some(index - 1),
                    _ => {
                        self.focus = FocusRegion::SearchField;
                        self.selected = None;
                    }
                }
                Action::Consumed
            }
            NavKey::Down => {
                match self.selected {
                    // no wraparound at the bottom
                    Some(index) if index + 1 < self.ordered.len() => {
                        self.selected = Some(index + 1)
                    }
                    Some(_) => {}
                    None => self.selected = self.first_index(),
                }
                Action::Consumed
            }
            NavKey::Enter | NavKey::Right => match self.selected() {
                Some(window) => Action::Activate(window.clone()),
                None => Action::Consumed,
            },
            NavKey::Escape => Action::Dismiss,
        }
    }

    fn first_index(&self) -> Option<usize> {
        if self.ordered.is_empty() { None } else { Some(0) }
    }

    fn last_index(&self) -> Option<usize> {
        self.ordered.len().checked_sub(1)
    }
}
