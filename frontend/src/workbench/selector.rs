//! Toggle-selection widgets fed by the schema synchronizer.
//!
//! A `ColumnSelector` holds the column list it was last rendered with and the
//! subset the user toggled on. Rendering always starts from an empty
//! selection, which is how a dropped column stops being selected anywhere:
//! the next redistribution re-renders every selector from scratch.

use std::collections::HashSet;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ColumnSelector {
    columns: Vec<String>,
    selected: HashSet<String>,
}

impl ColumnSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the token list and discards the previous selection.
    pub fn render(&mut self, columns: Vec<String>) {
        self.columns = columns;
        self.selected.clear();
    }

    /// Flips `column` and returns whether it is now selected. Names that are
    /// not part of the current rendering are ignored.
    pub fn toggle(&mut self, column: &str) -> bool {
        if !self.columns.iter().any(|c| c == column) {
            log::debug!("ignoring toggle of unrendered column '{}'", column);
            return false;
        }
        if self.selected.remove(column) {
            false
        } else {
            self.selected.insert(column.to_string());
            true
        }
    }

    /// Selected columns in render order.
    pub fn selection(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| self.selected.contains(c.as_str()))
            .cloned()
            .collect()
    }

    pub fn is_selected(&self, column: &str) -> bool {
        self.selected.contains(column)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Hue,
}

/// The three column pickers of the visualization form.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AxisPicker {
    columns: Vec<String>,
    x: Option<String>,
    y: Option<String>,
    hue: Option<String>,
}

impl AxisPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the option list and resets every axis to "not chosen".
    pub fn render(&mut self, columns: Vec<String>) {
        self.columns = columns;
        self.x = None;
        self.y = None;
        self.hue = None;
    }

    /// Sets `axis` to `column`. An empty or unknown name clears the axis.
    pub fn choose(&mut self, axis: Axis, column: Option<String>) {
        let column = column.filter(|c| self.columns.contains(c));
        match axis {
            Axis::X => self.x = column,
            Axis::Y => self.y = column,
            Axis::Hue => self.hue = column,
        }
    }

    pub fn chosen(&self, axis: Axis) -> Option<&str> {
        match axis {
            Axis::X => self.x.as_deref(),
            Axis::Y => self.y.as_deref(),
            Axis::Hue => self.hue.as_deref(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn selection_follows_render_order() {
        let mut selector = ColumnSelector::new();
        selector.render(names(&["a", "b", "c"]));
        selector.toggle("b");
        selector.toggle("a");
        assert_eq!(selector.selection(), names(&["a", "b"]));
    }

    #[test]
    fn rerender_clears_selection() {
        let mut selector = ColumnSelector::new();
        selector.render(names(&["x", "y"]));
        selector.toggle("x");
        selector.render(names(&["x", "y"]));
        assert!(selector.selection().is_empty());
        assert!(!selector.is_selected("x"));
    }

    #[test]
    fn unrendered_columns_cannot_be_selected() {
        let mut selector = ColumnSelector::new();
        selector.render(names(&["a"]));
        assert!(!selector.toggle("ghost"));
        assert!(!selector.has_selection());
    }

    #[test]
    fn axis_choices_are_limited_to_rendered_columns() {
        let mut picker = AxisPicker::new();
        picker.render(names(&["age", "city"]));
        picker.choose(Axis::X, Some("age".into()));
        picker.choose(Axis::Hue, Some("missing".into()));
        assert_eq!(picker.chosen(Axis::X), Some("age"));
        assert_eq!(picker.chosen(Axis::Hue), None);

        picker.render(names(&["city"]));
        assert_eq!(picker.chosen(Axis::X), None);
    }

    proptest! {
        #[test]
        fn toggle_twice_is_identity(
            columns in prop::collection::hash_set("[a-z]{1,6}", 1..8),
            pre in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
            target in any::<prop::sample::Index>(),
        ) {
            let columns: Vec<String> = columns.into_iter().collect();
            let mut selector = ColumnSelector::new();
            selector.render(columns.clone());
            for idx in pre {
                selector.toggle(idx.get(&columns).as_str());
            }
            let before = selector.selection();
            let column = target.get(&columns).clone();
            selector.toggle(&column);
            selector.toggle(&column);
            prop_assert_eq!(selector.selection(), before);
        }

        #[test]
        fn selection_is_an_ordered_subset_of_render(
            columns in prop::collection::hash_set("[a-z]{1,6}", 0..10),
            toggles in prop::collection::vec("[a-z]{1,6}", 0..20),
        ) {
            let columns: Vec<String> = columns.into_iter().collect();
            let mut selector = ColumnSelector::new();
            selector.render(columns.clone());
            for name in &toggles {
                selector.toggle(name);
            }
            let selection = selector.selection();
            let positions: Vec<usize> = selection
                .iter()
                .map(|s| columns.iter().position(|c| c == s).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
