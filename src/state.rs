use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::currency::{self, CurrencyError};
use crate::data::dataset::{LabeledDataset, LoadSummary};
use crate::data::error::DatasetError;
use crate::data::loader::{load_file, LoadOptions};
use crate::data::model::Category;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything one interactive session owns, independent of I/O.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Listings, filters and menu header.
    pub dataset: LabeledDataset,

    /// File read by "Load Data".
    pub data_path: PathBuf,

    /// Column names and delimiter used when reading `data_path`.
    pub load_options: LoadOptions,

    /// Currency the options table converts from. `None` until chosen.
    home_currency: Option<String>,
}

impl AppState {
    pub fn new(data_path: impl Into<PathBuf>, load_options: LoadOptions) -> Self {
        Self {
            dataset: LabeledDataset::new(),
            data_path: data_path.into(),
            load_options,
            home_currency: None,
        }
    }

    pub fn home_currency(&self) -> Option<&str> {
        self.home_currency.as_deref()
    }

    /// Set the home currency; unknown codes are rejected.
    pub fn set_home_currency(&mut self, code: &str) -> Result<(), CurrencyError> {
        let code = code.trim();
        if !currency::is_known(code) {
            return Err(CurrencyError::UnknownCurrency(code.to_string()));
        }
        self.home_currency = Some(code.to_string());
        Ok(())
    }

    /// (Re)load `data_path` into the dataset. If the file cannot be read at
    /// all, the dataset keeps its previous contents.
    pub fn load(&mut self) -> Result<LoadSummary> {
        let rows = load_file(&self.data_path, &self.load_options)
            .with_context(|| format!("loading {}", self.data_path.display()))?;
        Ok(self.dataset.load_data(rows))
    }

    /// Toggle a single label in a category's filter.
    pub fn toggle_filter_value(&mut self, category: Category, label: &str) -> Result<bool, DatasetError> {
        self.dataset.toggle_active_label(category, label)
    }

    /// Toggle the `number`-th label (1-based, ascending order) of `category`.
    /// Returns the label and its new state, or `None` if out of range.
    pub fn toggle_nth(
        &mut self,
        category: Category,
        number: usize,
    ) -> Result<Option<(String, bool)>, DatasetError> {
        let labels = self.dataset.labels(category)?;
        let Some(label) = number.checked_sub(1).and_then(|i| labels.iter().nth(i)).cloned() else {
            return Ok(None);
        };
        let active = self.toggle_filter_value(category, &label)?;
        Ok(Some((label, active)))
    }

    /// Select all values in a category.
    pub fn select_all(&mut self, category: Category) -> Result<(), DatasetError> {
        self.dataset.set_all_active(category, true)
    }

    /// Deselect all values in a category.
    pub fn select_none(&mut self, category: Category) -> Result<(), DatasetError> {
        self.dataset.set_all_active(category, false)
    }
}
