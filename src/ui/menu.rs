use std::fmt::Write as _;

use crate::data::dataset::LabeledDataset;
use crate::data::error::DatasetError;
use crate::data::model::Category;
use crate::data::stats::Stat;
use crate::ui::table::{fit, LABEL_WIDTH};

// ---------------------------------------------------------------------------
// Main menu
// ---------------------------------------------------------------------------

/// One entry of the main menu, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CrossTable(Stat),
    Summary(Category),
    AdjustFilters(Category),
    LoadData,
    Quit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 9] = [
        MenuChoice::CrossTable(Stat::Avg),
        MenuChoice::CrossTable(Stat::Min),
        MenuChoice::CrossTable(Stat::Max),
        MenuChoice::Summary(Category::Location),
        MenuChoice::Summary(Category::PropertyType),
        MenuChoice::AdjustFilters(Category::Location),
        MenuChoice::AdjustFilters(Category::PropertyType),
        MenuChoice::LoadData,
        MenuChoice::Quit,
    ];

    /// Map a menu number to its entry; `None` when out of range.
    pub fn from_number(number: i64) -> Option<MenuChoice> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> String {
        match self {
            MenuChoice::CrossTable(stat) => {
                format!("Print {stat} Rent by Location and Property Type")
            }
            MenuChoice::Summary(category) => format!("Print Min/Avg/Max by {}", category.title()),
            MenuChoice::AdjustFilters(category) => format!("Adjust {} Filters", category.title()),
            MenuChoice::LoadData => "Load Data".to_string(),
            MenuChoice::Quit => "Quit".to_string(),
        }
    }
}

/// The numbered main menu.
pub fn main_menu() -> String {
    let mut out = String::from("Main Menu\n");
    for (number, choice) in MenuChoice::ALL.iter().enumerate() {
        let _ = writeln!(out, "{} - {}", number + 1, choice.label());
    }
    out
}

// ---------------------------------------------------------------------------
// Filter listing
// ---------------------------------------------------------------------------

/// Numbered labels of `category` with their active state, in ascending order.
pub fn filter_listing(dataset: &LabeledDataset, category: Category) -> Result<String, DatasetError> {
    let active = dataset.active_labels(category)?;
    let mut out = String::from("The following labels are in the dataset:\n");
    for (number, label) in dataset.labels(category)?.iter().enumerate() {
        let state = if active.contains(label) {
            "ACTIVE"
        } else {
            "INACTIVE"
        };
        let _ = writeln!(out, "{}: {}{state}", number + 1, fit(label, LABEL_WIDTH));
    }
    Ok(out)
}
