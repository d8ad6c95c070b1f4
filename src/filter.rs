//! Query matching and ranking for the window list.

use crate::window::Window;

/// Filter `windows` down to those matching `query` and rank them.
///
/// An empty query returns the list as-is. Otherwise a window matches when the
/// query is a case-insensitive substring of its title or class, and matches
/// are ordered by: title prefix match, class prefix match, active workspace,
/// then lowercase title.
#[must_use]
pub fn filter_windows(windows: &[Window], query: &str) -> Vec<Window> {
    if query.is_empty() {
        return windows.to_vec();
    }

    let query = query.to_lowercase();

    let mut ranked: Vec<(RankKey, &Window)> = windows
        .iter()
        .filter_map(|window| RankKey::for_match(window, &query).map(|key| (key, window)))
        .collect();

    // sort_by is stable, equal keys keep their input order
    ranked.sort_by(|(a, _), (b, _)| a.cmp(b));

    ranked.into_iter().map(|(_, window)| window.clone()).collect()
}

/// Ascending sort key; `false` sorts before `true`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct RankKey {
    title_not_prefix: bool,
    class_not_prefix: bool,
    not_active: bool,
    title: String,
}

impl RankKey {
    /// Returns `None` when the window does not match `query` (already lowercase).
    fn for_match(window: &Window, query: &str) -> Option<Self> {
        let title = window.title.to_lowercase();
        let class = window.window_class.to_lowercase();

        if !title.contains(query) && !class.contains(query) {
            return None;
        }

        Some(RankKey {
            title_not_prefix: !title.starts_with(query),
            class_not_prefix: !class.starts_with(query),
            not_active: !window.is_active_workspace,
            title,
        })
    }
}
