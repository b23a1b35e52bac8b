/// Data layer: core types, loading, filtering and statistics.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Result<Record, DataError> per row
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ LabeledDataset │  Vec<Record>, header, LabelSets
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐   ┌──────────┐
///   │  filter   │ → │  stats   │  active labels → min / avg / max
///   └──────────┘   └──────────┘
/// ```

pub mod dataset;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
