use serde::{Deserialize, Serialize};

use super::{Identifier, ResultIds};
use crate::config::LESS_LIST_ITEMS_AMOUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Local,
    Global,
}

/// Per-tier "show more" state. Collapsed tiers expose only a short preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayWindow {
    preview_len: usize,
    local_expanded: bool,
    global_expanded: bool,
}

impl Default for DisplayWindow {
    fn default() -> Self {
        Self::new(LESS_LIST_ITEMS_AMOUNT)
    }
}

impl DisplayWindow {
    pub fn new(preview_len: usize) -> Self {
        DisplayWindow {
            preview_len,
            local_expanded: false,
            global_expanded: false,
        }
    }

    pub fn is_expanded(&self, tier: Tier) -> bool {
        match tier {
            Tier::Local => self.local_expanded,
            Tier::Global => self.global_expanded,
        }
    }

    pub fn toggle(&mut self, tier: Tier) {
        let flag = match tier {
            Tier::Local => &mut self.local_expanded,
            Tier::Global => &mut self.global_expanded,
        };
        *flag = !*flag;
    }

    /// Collapse both tiers, as when the search is dismissed.
    pub fn reset(&mut self) {
        self.local_expanded = false;
        self.global_expanded = false;
    }

    /// Whether a show more / show less toggle should be offered for a list of `len` items.
    pub fn has_toggle(&self, len: usize) -> bool {
        len > self.preview_len
    }

    pub fn visible<'a, T>(&self, tier: Tier, items: &'a [T]) -> &'a [T] {
        if self.is_expanded(tier) {
            items
        } else {
            &items[..items.len().min(self.preview_len)]
        }
    }

    pub fn section(&self, tier: Tier, items: ResultIds) -> Section {
        Section {
            visible_count: self.visible(tier, &items).len(),
            expanded: self.is_expanded(tier),
            has_toggle: self.has_toggle(items.len()),
            items,
        }
    }
}

/// One tier as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// The full tier; only the first `visible_count` items are shown.
    pub items: ResultIds,
    pub visible_count: usize,
    pub expanded: bool,
    pub has_toggle: bool,
}

impl Section {
    pub fn visible(&self) -> &[Identifier] {
        &self.items[..self.visible_count.min(self.items.len())]
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn results(n: usize) -> ResultIds {
        (1..=n).map(|i| format!("c{}", i)).collect::<Vec<_>>().into()
    }

    #[test]
    fn test_collapsed_shows_first_five() {
        let window = DisplayWindow::default();
        let section = window.section(Tier::Local, results(7));
        assert_eq!(section.visible().len(), 5);
        assert_eq!(section.visible()[4], "c5");
        assert!(section.has_toggle);
        assert!(!section.expanded);
        assert_eq!(section.total(), 7);
    }

    #[test]
    fn test_expanded_shows_all() {
        let mut window = DisplayWindow::default();
        window.toggle(Tier::Local);
        let section = window.section(Tier::Local, results(7));
        assert_eq!(section.visible().len(), 7);
        assert!(section.expanded);
    }

    #[test]
    fn test_tiers_toggle_independently() {
        let mut window = DisplayWindow::default();
        window.toggle(Tier::Global);
        assert!(window.is_expanded(Tier::Global));
        assert!(!window.is_expanded(Tier::Local));
        window.toggle(Tier::Global);
        assert!(!window.is_expanded(Tier::Global));
    }

    #[test]
    fn test_no_toggle_for_short_lists() {
        let window = DisplayWindow::default();
        assert!(!window.section(Tier::Global, results(5)).has_toggle);
        assert!(window.section(Tier::Global, results(6)).has_toggle);
        let empty = window.section(Tier::Global, Arc::from(Vec::new()));
        assert!(empty.visible().is_empty());
    }

    #[test]
    fn test_visible_count_past_end_is_clamped() {
        let section = Section {
            items: results(2),
            visible_count: 5,
            expanded: false,
            has_toggle: false,
        };
        assert_eq!(section.visible(), &["c1".to_string(), "c2".to_string()]);
    }

    #[test]
    fn test_reset_collapses() {
        let mut window = DisplayWindow::new(3);
        window.toggle(Tier::Local);
        window.toggle(Tier::Global);
        window.reset();
        assert_eq!(window, DisplayWindow::new(3));
        assert_eq!(window.visible(Tier::Local, &[1, 2, 3, 4]), &[1, 2, 3]);
    }
}
