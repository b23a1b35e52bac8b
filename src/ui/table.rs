use crate::data::dataset::LabeledDataset;
use crate::data::error::DatasetError;
use crate::data::model::Category;
use crate::data::stats::{Stat, Stats};

/// Width of the leading label column.
pub const LABEL_WIDTH: usize = 20;
/// Width of every value column.
pub const CELL_WIDTH: usize = 16;

const NOT_AVAILABLE: &str = "N/A";

fn sorted<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut labels: Vec<&str> = labels.into_iter().collect();
    labels.sort();
    labels
}

/// Pad `text` to `width` characters. Longer text is cut so that at least
/// one blank always separates adjacent columns.
pub fn fit(text: &str, width: usize) -> String {
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept:<width$}")
}

fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => fit(&format!("$ {v:.2}"), CELL_WIDTH),
        None => fit(NOT_AVAILABLE, CELL_WIDTH),
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

// ---------------------------------------------------------------------------
// Generic grid
// ---------------------------------------------------------------------------

/// Render a grid of one statistic. Rows and columns are sorted; cells whose
/// lookup yields `None` print `N/A`.
pub fn render_grid<'a, F>(
    rows: impl IntoIterator<Item = &'a str>,
    columns: impl IntoIterator<Item = &'a str>,
    stat: Stat,
    mut lookup: F,
) -> Result<String, DatasetError>
where
    F: FnMut(&str, &str) -> Result<Option<Stats>, DatasetError>,
{
    let rows = sorted(rows);
    let columns = sorted(columns);

    let mut out = String::new();
    let mut line = fit("", LABEL_WIDTH);
    for &col in &columns {
        line.push_str(&fit(col, CELL_WIDTH));
    }
    push_line(&mut out, &line);

    for &row in &rows {
        let mut line = fit(row, LABEL_WIDTH);
        for &col in &columns {
            let stats = lookup(row, col)?;
            line.push_str(&cell(stats.map(|s| s.get(stat))));
        }
        push_line(&mut out, &line);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Dataset tables
// ---------------------------------------------------------------------------

/// Locations down, property types across, one statistic per cell.
pub fn cross_table(dataset: &LabeledDataset, stat: Stat) -> Result<String, DatasetError> {
    let locations = dataset.labels(Category::Location)?;
    let properties = dataset.labels(Category::PropertyType)?;
    render_grid(
        locations.iter().map(String::as_str),
        properties.iter().map(String::as_str),
        stat,
        |loc, prop| dataset.cross_tabulate(loc, prop),
    )
}

/// Minimum / average / maximum for every label of `category`, counting only
/// listings whose other field is active.
pub fn summary_table(dataset: &LabeledDataset, category: Category) -> Result<String, DatasetError> {
    let criteria = dataset.active_labels(category.other())?;

    let mut out = String::from("The following data are from properties matching these criteria:\n");
    for label in sorted(criteria.iter().map(String::as_str)) {
        push_line(&mut out, &format!("- {label}"));
    }

    let mut line = fit("", LABEL_WIDTH);
    for stat in Stat::ALL {
        line.push_str(&fit(&stat.to_string(), CELL_WIDTH));
    }
    push_line(&mut out, &line);

    for label in sorted(dataset.labels(category)?.iter().map(String::as_str)) {
        let mut line = fit(label, LABEL_WIDTH);
        let stats = dataset.field_summary(category, label)?;
        for stat in Stat::ALL {
            line.push_str(&cell(stats.map(|s| s.get(stat))));
        }
        push_line(&mut out, &line);
    }
    Ok(out)
}
