// SPDX-License-Identifier: GPL-3.0-only

//! Activity autocompletion over the daemon's known (name, category) pairs.
//!
//! The index is rebuilt whenever the daemon signals an activity change.
//! Names are casefolded on insert so matching is case-insensitive; the
//! inline-vs-dropdown flag is carried along for the entry widget but does
//! not affect which entries match.

use crate::fact::Activity;

#[derive(Debug, Clone)]
struct IndexedActivity {
    /// Casefolded name, the key matching runs against.
    folded: String,
    activity: Activity,
}

/// Searchable snapshot of the daemon's activity list.
#[derive(Debug, Clone, Default)]
pub struct ActivityIndex {
    entries: Vec<IndexedActivity>,
    dropdown: bool,
}

impl ActivityIndex {
    pub fn new(dropdown: bool) -> Self {
        Self {
            entries: Vec::new(),
            dropdown,
        }
    }

    /// Replace the index contents with a fresh activity list, input order
    /// preserved.
    pub fn rebuild(&mut self, activities: &[Activity]) {
        self.entries = activities
            .iter()
            .map(|activity| IndexedActivity {
                folded: activity.name.to_lowercase(),
                activity: activity.clone(),
            })
            .collect();
    }

    /// Case-insensitive prefix matches for a partial entry. An empty input
    /// matches every activity.
    pub fn matches(&self, input: &str) -> Vec<&Activity> {
        let folded_input = input.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.folded.starts_with(&folded_input))
            .map(|entry| &entry.activity)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether completion should present as a dropdown instead of inline.
    /// Presentation only; matching is unaffected.
    pub fn dropdown(&self) -> bool {
        self.dropdown
    }

    pub fn set_dropdown(&mut self, dropdown: bool) {
        self.dropdown = dropdown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activities() -> Vec<Activity> {
        ["Email@Work", "Coding@Work", "errands@Home"]
            .iter()
            .map(|s| {
                let (name, category) = s.split_once('@').unwrap();
                Activity {
                    name: name.to_string(),
                    category: category.to_string(),
                }
            })
            .collect()
    }

    /// Test: matching is case-insensitive over the casefolded name.
    #[test]
    fn test_case_insensitive_prefix_match() {
        let mut index = ActivityIndex::new(false);
        index.rebuild(&activities());

        let hits = index.matches("e");
        let names: Vec<&str> = hits.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Email", "errands"]);

        assert_eq!(index.matches("COD").len(), 1);
        assert_eq!(index.matches("cod")[0].fact_label(), "Coding@Work");
    }

    /// Test: empty input matches everything, in input order.
    #[test]
    fn test_empty_input_matches_all() {
        let mut index = ActivityIndex::new(false);
        index.rebuild(&activities());
        assert_eq!(index.matches("").len(), 3);
    }

    /// Test: rebuilding replaces rather than appends.
    #[test]
    fn test_rebuild_replaces() {
        let mut index = ActivityIndex::new(false);
        index.rebuild(&activities());
        assert_eq!(index.len(), 3);

        index.rebuild(&activities()[..1]);
        assert_eq!(index.len(), 1);
        assert!(index.matches("coding").is_empty());
    }

    /// Test: the dropdown flag is carried but does not change matching.
    #[test]
    fn test_dropdown_flag_is_presentation_only() {
        let mut inline = ActivityIndex::new(false);
        let mut dropdown = ActivityIndex::new(true);
        inline.rebuild(&activities());
        dropdown.rebuild(&activities());

        assert!(!inline.dropdown());
        assert!(dropdown.dropdown());
        assert_eq!(inline.matches("e").len(), dropdown.matches("e").len());

        inline.set_dropdown(true);
        assert!(inline.dropdown());
    }
}
