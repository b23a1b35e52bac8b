use std::collections::{BTreeMap, BTreeSet};

use super::model::{Category, Record};

// ---------------------------------------------------------------------------
// Label sets: every label seen per category, and the active subset
// ---------------------------------------------------------------------------

/// Per-category label state. `active[c]` is always a subset of `all[c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSets {
    all: BTreeMap<Category, BTreeSet<String>>,
    active: BTreeMap<Category, BTreeSet<String>>,
}

impl LabelSets {
    /// Derive label sets from `records` with every label active.
    pub fn from_records(records: &[Record]) -> Self {
        let mut all: BTreeMap<Category, BTreeSet<String>> = Category::ALL
            .iter()
            .map(|&c| (c, BTreeSet::new()))
            .collect();

        for record in records {
            for category in Category::ALL {
                all.entry(category)
                    .or_default()
                    .insert(record.field(category).to_string());
            }
        }

        LabelSets {
            active: all.clone(),
            all,
        }
    }

    pub fn all(&self, category: Category) -> &BTreeSet<String> {
        &self.all[&category]
    }

    pub fn active(&self, category: Category) -> &BTreeSet<String> {
        &self.active[&category]
    }

    pub fn contains(&self, category: Category, label: &str) -> bool {
        self.all(category).contains(label)
    }

    pub fn is_active(&self, category: Category, label: &str) -> bool {
        self.active(category).contains(label)
    }

    /// Flip `label` in the active set. Returns the new membership, or `None`
    /// when the label is unknown (nothing changes in that case).
    pub fn toggle(&mut self, category: Category, label: &str) -> Option<bool> {
        if !self.contains(category, label) {
            return None;
        }
        let selected = self.active.entry(category).or_default();
        if selected.remove(label) {
            Some(false)
        } else {
            selected.insert(label.to_string());
            Some(true)
        }
    }

    /// Select every label of `category`.
    pub fn select_all(&mut self, category: Category) {
        let all_vals = self.all(category).clone();
        self.active.insert(category, all_vals);
    }

    /// Deselect every label of `category`.
    pub fn select_none(&mut self, category: Category) {
        self.active.insert(category, BTreeSet::new());
    }

    /// A record passes the filter for `category` when its value in the
    /// *other* category is active.
    pub fn passes(&self, record: &Record, category: Category) -> bool {
        let other = category.other();
        self.is_active(other, record.field(other))
    }
}
