use std::collections::BTreeSet;

use super::error::{DataError, DatasetError};
use super::filter::LabelSets;
use super::model::{Category, Header, Record};
use super::stats::Stats;

/// How many skip reasons a [`LoadSummary`] keeps for display.
const MAX_REPORTED_SKIPS: usize = 5;

/// Outcome of [`LabeledDataset::load_data`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: usize,
    /// `(row number, reason)` for the first few skipped rows.
    pub first_skips: Vec<(usize, DataError)>,
}

/// Loaded records plus the label sets derived from them.
#[derive(Debug, Clone)]
struct Loaded {
    records: Vec<Record>,
    labels: LabelSets,
}

/// Rental listings grouped by location and property type, with per-category
/// active-label filters and a menu header.
#[derive(Debug, Clone, Default)]
pub struct LabeledDataset {
    header: Header,
    /// `None` until data has been loaded once.
    data: Option<Loaded>,
}

impl LabeledDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> &str {
        self.header.as_str()
    }

    /// Replace the header. An invalid header is rejected and the previous
    /// one is kept.
    pub fn set_header(&mut self, text: impl Into<String>) -> Result<(), DatasetError> {
        self.header = Header::new(text)?;
        Ok(())
    }

    #[cfg(test)]
    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// Replace all records with the good rows from `source`, skipping the
    /// malformed ones, then reset every label to active.
    pub fn load_data<I>(&mut self, source: I) -> LoadSummary
    where
        I: IntoIterator<Item = Result<Record, DataError>>,
    {
        let mut summary = LoadSummary::default();
        let mut records = Vec::new();

        for (row, result) in source.into_iter().enumerate() {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    log::warn!("Skipping row {}: {e}", row + 1);
                    summary.skipped += 1;
                    if summary.first_skips.len() < MAX_REPORTED_SKIPS {
                        summary.first_skips.push((row + 1, e));
                    }
                }
            }
        }

        summary.loaded = records.len();
        let labels = LabelSets::from_records(&records);
        self.data = Some(Loaded { records, labels });

        log::info!(
            "Loaded {} records ({} skipped)",
            summary.loaded,
            summary.skipped
        );
        summary
    }

    fn loaded(&self) -> Result<&Loaded, DatasetError> {
        self.data.as_ref().ok_or(DatasetError::EmptyDataset)
    }

    fn loaded_mut(&mut self) -> Result<&mut Loaded, DatasetError> {
        self.data.as_mut().ok_or(DatasetError::EmptyDataset)
    }

    #[cfg(test)]
    pub fn records(&self) -> Result<&[Record], DatasetError> {
        Ok(&self.loaded()?.records)
    }

    /// Every label observed for `category`, in ascending order.
    pub fn labels(&self, category: Category) -> Result<&BTreeSet<String>, DatasetError> {
        Ok(self.loaded()?.labels.all(category))
    }

    /// The currently active labels for `category`, in ascending order.
    pub fn active_labels(&self, category: Category) -> Result<&BTreeSet<String>, DatasetError> {
        Ok(self.loaded()?.labels.active(category))
    }

    /// Flip `label` in or out of the active set. Returns whether it is
    /// active afterwards.
    pub fn toggle_active_label(
        &mut self,
        category: Category,
        label: &str,
    ) -> Result<bool, DatasetError> {
        let loaded = self.loaded_mut()?;
        let now_active =
            loaded
                .labels
                .toggle(category, label)
                .ok_or_else(|| DatasetError::UnknownLabel {
                    category,
                    label: label.to_string(),
                })?;
        log::debug!("{category} label {label:?} active: {now_active}");
        Ok(now_active)
    }

    /// Activate (or deactivate) every label of `category`.
    pub fn set_all_active(&mut self, category: Category, active: bool) -> Result<(), DatasetError> {
        let labels = &mut self.loaded_mut()?.labels;
        if active {
            labels.select_all(category);
        } else {
            labels.select_none(category);
        }
        log::debug!("all {category} labels active: {active}");
        Ok(())
    }

    /// Statistics over listings matching both labels. Filters do not apply.
    pub fn cross_tabulate(
        &self,
        location: &str,
        property_type: &str,
    ) -> Result<Option<Stats>, DatasetError> {
        let loaded = self.loaded()?;
        Ok(Stats::from_prices(
            loaded
                .records
                .iter()
                .filter(|r| r.location() == location && r.property_type() == property_type)
                .map(Record::price),
        ))
    }

    /// Statistics over listings whose `category` field equals `label` and
    /// whose complementary field is an active label.
    pub fn field_summary(
        &self,
        category: Category,
        label: &str,
    ) -> Result<Option<Stats>, DatasetError> {
        let loaded = self.loaded()?;
        Ok(Stats::from_prices(
            loaded
                .records
                .iter()
                .filter(|r| r.field(category) == label && loaded.labels.passes(r, category))
                .map(Record::price),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: &[(&str, &str, f64)]) -> Vec<Result<Record, DataError>> {
        raw.iter()
            .map(|&(loc, prop, price)| Record::new(loc, prop, price))
            .collect()
    }

    fn loaded(raw: &[(&str, &str, f64)]) -> LabeledDataset {
        let mut ds = LabeledDataset::new();
        ds.load_data(rows(raw));
        ds
    }

    fn assert_active_subset(ds: &LabeledDataset) {
        for category in Category::ALL {
            let all = ds.labels(category).unwrap();
            assert!(ds.active_labels(category).unwrap().is_subset(all));
        }
    }

    #[test]
    fn queries_before_load_fail() {
        let mut ds = LabeledDataset::new();
        assert!(!ds.is_loaded());
        assert_eq!(ds.cross_tabulate("A", "X"), Err(DatasetError::EmptyDataset));
        assert_eq!(
            ds.field_summary(Category::Location, "A"),
            Err(DatasetError::EmptyDataset)
        );
        assert_eq!(ds.labels(Category::Location), Err(DatasetError::EmptyDataset));
        assert_eq!(
            ds.active_labels(Category::PropertyType),
            Err(DatasetError::EmptyDataset)
        );
        assert_eq!(
            ds.toggle_active_label(Category::Location, "A"),
            Err(DatasetError::EmptyDataset)
        );
    }

    #[test]
    fn cross_tabulate_min_avg_max() {
        let ds = loaded(&[("A", "X", 100.0), ("A", "X", 200.0)]);
        assert_eq!(
            ds.cross_tabulate("A", "X").unwrap(),
            Some(Stats {
                min: 100.0,
                avg: 150.0,
                max: 200.0
            })
        );
    }

    #[test]
    fn cross_tabulate_without_matches_is_none() {
        let ds = loaded(&[("A", "X", 100.0), ("B", "Y", 50.0)]);
        assert_eq!(ds.cross_tabulate("A", "Y").unwrap(), None);
        assert_eq!(ds.cross_tabulate("nowhere", "X").unwrap(), None);
    }

    #[test]
    fn cross_tabulate_ignores_filters() {
        let mut ds = loaded(&[("A", "X", 100.0)]);
        ds.toggle_active_label(Category::PropertyType, "X").unwrap();
        assert!(ds.cross_tabulate("A", "X").unwrap().is_some());
    }

    #[test]
    fn field_summary_applies_complementary_filter() {
        let mut ds = loaded(&[("A", "X", 10.0), ("A", "Y", 20.0)]);
        ds.toggle_active_label(Category::PropertyType, "Y").unwrap();
        assert_eq!(
            ds.field_summary(Category::Location, "A").unwrap(),
            Some(Stats {
                min: 10.0,
                avg: 10.0,
                max: 10.0
            })
        );
        // The filter only constrains the other axis.
        assert!(ds.field_summary(Category::PropertyType, "Y").unwrap().is_some());
    }

    #[test]
    fn field_summary_with_everything_filtered_is_none() {
        let mut ds = loaded(&[("A", "X", 10.0), ("B", "X", 30.0)]);
        ds.set_all_active(Category::Location, false).unwrap();
        assert_eq!(ds.field_summary(Category::PropertyType, "X").unwrap(), None);
        ds.set_all_active(Category::Location, true).unwrap();
        assert_eq!(
            ds.field_summary(Category::PropertyType, "X").unwrap().map(|s| s.avg),
            Some(20.0)
        );
    }

    #[test]
    fn toggle_is_an_involution_and_keeps_subset() {
        let mut ds = loaded(&[("A", "X", 10.0), ("B", "Y", 20.0)]);
        let before = ds.active_labels(Category::Location).unwrap().clone();
        assert!(!ds.toggle_active_label(Category::Location, "A").unwrap());
        assert_active_subset(&ds);
        assert!(ds.toggle_active_label(Category::Location, "A").unwrap());
        assert_active_subset(&ds);
        assert_eq!(ds.active_labels(Category::Location).unwrap(), &before);
    }

    #[test]
    fn toggle_unknown_label_leaves_state_unchanged() {
        let mut ds = loaded(&[("A", "X", 10.0)]);
        let err = ds
            .toggle_active_label(Category::PropertyType, "A")
            .unwrap_err();
        assert_eq!(
            err,
            DatasetError::UnknownLabel {
                category: Category::PropertyType,
                label: "A".into()
            }
        );
        let active: Vec<_> = ds
            .active_labels(Category::PropertyType)
            .unwrap()
            .iter()
            .collect();
        assert_eq!(active, ["X"]);
    }

    #[test]
    fn load_replaces_records_and_resets_labels() {
        let mut ds = loaded(&[("A", "X", 10.0), ("B", "Y", 20.0)]);
        ds.toggle_active_label(Category::Location, "A").unwrap();

        let summary = ds.load_data(rows(&[("C", "Z", 5.0)]));
        assert_eq!(summary.loaded, 1);
        assert_eq!(ds.records().unwrap().len(), 1);
        for category in Category::ALL {
            assert_eq!(ds.labels(category).unwrap().len(), 1);
            assert_eq!(ds.active_labels(category), ds.labels(category));
        }
        assert_eq!(ds.cross_tabulate("A", "X").unwrap(), None);
    }

    #[test]
    fn load_skips_malformed_rows() {
        let mut ds = LabeledDataset::new();
        let source = vec![
            Record::new("A", "X", 10.0),
            Err(DataError::InvalidPrice("ten".into())),
            Record::new("A", "X", 30.0),
            Err(DataError::FieldCount {
                expected: 3,
                found: 1,
            }),
        ];
        let summary = ds.load_data(source);
        assert_eq!(summary.loaded, 2);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.first_skips[0].0, 2);
        assert_eq!(ds.cross_tabulate("A", "X").unwrap().map(|s| s.avg), Some(20.0));
        assert_active_subset(&ds);
    }

    #[test]
    fn loading_nothing_still_counts_as_loaded() {
        let mut ds = LabeledDataset::new();
        ds.load_data(Vec::new());
        assert!(ds.is_loaded());
        assert!(ds.labels(Category::Location).unwrap().is_empty());
        assert_eq!(ds.cross_tabulate("A", "X").unwrap(), None);
    }

    #[test]
    fn invalid_header_keeps_previous_value() {
        let mut ds = LabeledDataset::new();
        assert_eq!(ds.header(), "");
        ds.set_header("Airbnb NYC").unwrap();
        let err = ds.set_header("x".repeat(30)).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidHeader { length: 30, .. }));
        assert_eq!(ds.header(), "Airbnb NYC");
        ds.set_header("y".repeat(29)).unwrap();
        assert_eq!(ds.header(), "y".repeat(29));
    }
}
