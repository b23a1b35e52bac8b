use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::Record;

/// One parsed row per data row in the source, good or bad.
pub type Rows = Vec<Result<Record, DataError>>;

/// Which columns hold the three fields, and how delimited files are split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub location_column: String,
    pub property_column: String,
    pub price_column: String,
    pub delimiter: u8,
}

impl Default for LoadOptions {
    /// Column names of the public Airbnb NYC listings file.
    fn default() -> Self {
        Self {
            location_column: "neighbourhood_group".to_string(),
            property_column: "room_type".to_string(),
            price_column: "price".to_string(),
            delimiter: b',',
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read listings from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` / `.txt` – header row, then one listing per line
/// * `.json`    – `[{ "neighbourhood_group": ..., "room_type": ..., "price": ... }, ...]`
/// * `.parquet` – label columns as strings, price as any numeric column
///
/// File-level problems (unreadable file, missing column) fail the whole
/// load. Problems with a single row come back as an `Err` in its slot.
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<Rows> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "tsv" | "txt" => load_csv(path, options),
        "json" => load_json(path, options),
        "parquet" | "pq" => load_parquet(path, options),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn non_empty<'a>(value: &'a str, column: &str) -> Result<&'a str, DataError> {
    let value = value.trim();
    if value.is_empty() {
        Err(DataError::MissingField(column.to_string()))
    } else {
        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row with column names; every data row must have as many fields as
/// the header. Columns other than the three configured ones are ignored.
fn load_csv(path: &Path, options: &LoadOptions) -> Result<Rows> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let column_index = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let loc_idx = column_index(&options.location_column)?;
    let prop_idx = column_index(&options.property_column)?;
    let price_idx = column_index(&options.price_column)?;

    let mut rows = Vec::new();

    // Byte records, so a row with bad UTF-8 is skipped instead of ending the load.
    for (row_no, result) in reader.byte_records().enumerate() {
        let record = result.with_context(|| format!("reading CSV row {}", row_no + 1))?;

        if record.len() != headers.len() {
            rows.push(Err(DataError::FieldCount {
                expected: headers.len(),
                found: record.len(),
            }));
            continue;
        }

        let row = csv_field(&record, loc_idx, &options.location_column).and_then(|location| {
            let property = csv_field(&record, prop_idx, &options.property_column)?;
            let price = csv_field(&record, price_idx, &options.price_column)?;
            Record::parse(location, property, price)
        });
        rows.push(row);
    }

    Ok(rows)
}

fn csv_field<'a>(record: &'a csv::ByteRecord, idx: usize, column: &str) -> Result<&'a str, DataError> {
    let bytes = record.get(idx).unwrap_or_default();
    let text =
        std::str::from_utf8(bytes).map_err(|_| DataError::InvalidEncoding(column.to_string()))?;
    non_empty(text, column)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "neighbourhood_group": "Brooklyn", "room_type": "Private room", "price": 149 },
///   ...
/// ]
/// ```
fn load_json(path: &Path, options: &LoadOptions) -> Result<Rows> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    Ok(records
        .iter()
        .map(|rec| json_record(rec, options))
        .collect())
}

fn json_record(rec: &JsonValue, options: &LoadOptions) -> Result<Record, DataError> {
    let obj = rec.as_object().ok_or(DataError::FieldCount {
        expected: 3,
        found: 0,
    })?;

    let label = |column: &str| -> Result<String, DataError> {
        match obj.get(column) {
            Some(JsonValue::String(s)) => non_empty(s, column).map(str::to_string),
            Some(JsonValue::Number(n)) => Ok(n.to_string()),
            _ => Err(DataError::MissingField(column.to_string())),
        }
    };
    let location = label(&options.location_column)?;
    let property = label(&options.property_column)?;

    match obj.get(&options.price_column) {
        Some(JsonValue::Number(n)) => {
            let price = n
                .as_f64()
                .ok_or_else(|| DataError::InvalidPrice(n.to_string()))?;
            Record::new(location, property, price)
        }
        Some(JsonValue::String(s)) => Record::parse(&location, &property, s),
        Some(JsonValue::Null) | None => Err(DataError::MissingField(options.price_column.clone())),
        Some(other) => Err(DataError::InvalidPrice(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of listings.
///
/// Expected schema:
/// - location / property columns: Utf8 or LargeUtf8 (other types are
///   rendered as text)
/// - price column: Int32, Int64, Float32, Float64, or numeric text
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path, options: &LoadOptions) -> Result<Rows> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let loc_col = column_by_name(&batch, &options.location_column)?;
        let prop_col = column_by_name(&batch, &options.property_column)?;
        let price_col = column_by_name(&batch, &options.price_column)?;

        for row in 0..batch.num_rows() {
            let record = extract_label(loc_col, row, &options.location_column).and_then(|location| {
                let property = extract_label(prop_col, row, &options.property_column)?;
                let price = extract_price(price_col, row, &options.price_column)?;
                Record::new(location, property, price)
            });
            rows.push(record);
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

fn column_by_name<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

/// Extract a label from a column at the given row as text.
fn extract_label(col: &ArrayRef, row: usize, name: &str) -> Result<String, DataError> {
    if col.is_null(row) {
        return Err(DataError::MissingField(name.to_string()));
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        _ => array_value_to_string(col, row)
            .map_err(|_| DataError::MissingField(name.to_string()))?,
    };
    non_empty(&text, name).map(str::to_string)
}

/// Extract a price from a numeric (or numeric text) column.
fn extract_price(col: &ArrayRef, row: usize, name: &str) -> Result<f64, DataError> {
    if col.is_null(row) {
        return Err(DataError::MissingField(name.to_string()));
    }
    let price = match col.data_type() {
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row) as f64,
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row),
        other => {
            let text = array_value_to_string(col, row)
                .map_err(|_| DataError::InvalidPrice(format!("{other:?}")))?;
            text.trim()
                .parse::<f64>()
                .map_err(|_| DataError::InvalidPrice(text.clone()))?
        }
    };
    Ok(price)
}
