use std::fmt;

use super::error::{DataError, DatasetError};

// ---------------------------------------------------------------------------
// Category – the two classification axes of a listing
// ---------------------------------------------------------------------------

/// Which field of a [`Record`] a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Location,
    PropertyType,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Location, Category::PropertyType];

    /// The complementary axis, used for cross-category filtering.
    pub fn other(self) -> Category {
        match self {
            Category::Location => Category::PropertyType,
            Category::PropertyType => Category::Location,
        }
    }

    /// Capitalised name for menus and table preambles.
    pub fn title(self) -> &'static str {
        match self {
            Category::Location => "Location",
            Category::PropertyType => "Property Type",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Location => write!(f, "location"),
            Category::PropertyType => write!(f, "property type"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one listing
// ---------------------------------------------------------------------------

/// A single listing. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    location: String,
    property_type: String,
    price: f64,
}

impl Record {
    /// Build a record, rejecting negative or non-finite prices.
    pub fn new(
        location: impl Into<String>,
        property_type: impl Into<String>,
        price: f64,
    ) -> Result<Self, DataError> {
        if !price.is_finite() || price < 0.0 {
            return Err(DataError::InvalidPrice(price.to_string()));
        }
        Ok(Record {
            location: location.into(),
            property_type: property_type.into(),
            price,
        })
    }

    /// Build a record from raw text fields as found in a delimited file.
    pub fn parse(location: &str, property_type: &str, price: &str) -> Result<Self, DataError> {
        let value: f64 = price
            .trim()
            .parse()
            .map_err(|_| DataError::InvalidPrice(price.to_string()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(DataError::InvalidPrice(price.to_string()));
        }
        Record::new(location.trim(), property_type.trim(), value)
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn property_type(&self) -> &str {
        &self.property_type
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// The label this record carries for `category`.
    pub fn field(&self, category: Category) -> &str {
        match category {
            Category::Location => &self.location,
            Category::PropertyType => &self.property_type,
        }
    }
}

// ---------------------------------------------------------------------------
// Header – menu title shown above the main menu
// ---------------------------------------------------------------------------

/// Longest header accepted, in characters.
pub const HEADER_MAX_LEN: usize = 29;

/// A validated menu header, at most [`HEADER_MAX_LEN`] characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header(String);

impl Header {
    pub fn new(text: impl Into<String>) -> Result<Self, DatasetError> {
        let text = text.into();
        let length = text.chars().count();
        if length > HEADER_MAX_LEN {
            return Err(DatasetError::InvalidHeader {
                header: text,
                length,
            });
        }
        Ok(Header(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
