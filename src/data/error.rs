use thiserror::Error;

use super::model::Category;

/// Errors raised by [`LabeledDataset`](super::dataset::LabeledDataset) queries
/// and mutations. None of them are fatal; the caller renders them as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// A query was issued before any data was loaded.
    #[error("no data has been loaded")]
    EmptyDataset,

    /// A toggle named a label that does not occur in the category.
    #[error("{label:?} is not a known {category} label")]
    UnknownLabel { category: Category, label: String },

    /// A header of 30 characters or more.
    #[error("header {header:?} is {length} characters long; it must be shorter than 30 characters")]
    InvalidHeader { header: String, length: usize },
}

/// A single malformed row encountered while loading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("missing value for column '{0}'")]
    MissingField(String),

    #[error("value in column '{0}' is not valid UTF-8")]
    InvalidEncoding(String),

    #[error("price '{0}' is not a non-negative number")]
    InvalidPrice(String),
}
