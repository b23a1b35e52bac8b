use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::data::loader::LoadOptions;

/// Interactive min/avg/max rent tables for a listings file.
#[derive(Parser, Debug, Clone)]
#[command(name = "rent-tabulator", version)]
pub struct Config {
    /// Listings file read by "Load Data" (.csv, .tsv, .json or .parquet).
    #[arg(long, default_value = "AB_NYC_2019.csv")]
    pub data: PathBuf,

    /// Column holding the location label.
    #[arg(long, default_value = "neighbourhood_group")]
    pub location_column: String,

    /// Column holding the property type label.
    #[arg(long, default_value = "room_type")]
    pub property_column: String,

    /// Column holding the nightly price.
    #[arg(long, default_value = "price")]
    pub price_column: String,

    /// Field delimiter for delimited files.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Home currency code; asked for interactively when omitted.
    #[arg(long)]
    pub home_currency: Option<String>,
}

impl Config {
    /// Loader settings derived from the flags.
    pub fn load_options(&self) -> Result<LoadOptions> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got {:?}", self.delimiter);
        }
        Ok(LoadOptions {
            location_column: self.location_column.clone(),
            property_column: self.property_column.clone(),
            price_column: self.price_column.clone(),
            delimiter: self.delimiter as u8,
        })
    }
}
