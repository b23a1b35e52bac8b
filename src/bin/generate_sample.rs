use std::sync::Arc;

use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Column layout of the public Airbnb NYC listings export (subset).
#[derive(Debug, Serialize)]
struct Listing {
    id: i64,
    name: String,
    neighbourhood_group: &'static str,
    room_type: &'static str,
    price: i64,
}

/// Deterministic splitmix64 stream.
struct ListingRng(u64);

impl ListingRng {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Normally distributed nightly price, floored at 10.
    fn price(&mut self, mean: f64, spread: f64) -> i64 {
        let u = self.unit().max(f64::MIN_POSITIVE);
        let z = (-2.0 * u.ln()).sqrt() * (std::f64::consts::TAU * self.unit()).cos();
        (mean + spread * z).max(10.0).round() as i64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next() % items.len() as u64) as usize]
    }
}

fn main() -> anyhow::Result<()> {
    let mut rng = ListingRng(2019);

    // (borough, relative price level)
    let boroughs = [
        ("Bronx", 0.7),
        ("Brooklyn", 1.0),
        ("Manhattan", 1.5),
        ("Queens", 0.8),
        ("Staten Island", 0.75),
    ];
    // (room type, base nightly price)
    let room_types = [
        ("Entire home/apt", 180.0),
        ("Private room", 85.0),
        ("Shared room", 55.0),
    ];

    let listings: Vec<Listing> = (1..=500)
        .map(|id| {
            let &(borough, level) = rng.pick(&boroughs);
            let &(room_type, base) = rng.pick(&room_types);
            let price = rng.price(base * level, base * 0.25);
            Listing {
                id,
                name: format!("{room_type} in {borough} #{id}"),
                neighbourhood_group: borough,
                room_type,
                price,
            }
        })
        .collect();

    // Write CSV
    let csv_path = "sample_listings.csv";
    let mut writer = csv::Writer::from_path(csv_path)?;
    for listing in &listings {
        writer.serialize(listing)?;
    }
    writer.flush()?;

    // Build Arrow arrays
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("neighbourhood_group", DataType::Utf8, false),
        Field::new("room_type", DataType::Utf8, false),
        Field::new("price", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(listings.iter().map(|l| l.id))),
            Arc::new(StringArray::from_iter_values(listings.iter().map(|l| l.name.as_str()))),
            Arc::new(StringArray::from_iter_values(
                listings.iter().map(|l| l.neighbourhood_group),
            )),
            Arc::new(StringArray::from_iter_values(listings.iter().map(|l| l.room_type))),
            Arc::new(Int64Array::from_iter_values(listings.iter().map(|l| l.price))),
        ],
    )?;

    // Write Parquet
    let parquet_path = "sample_listings.parquet";
    let file = std::fs::File::create(parquet_path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!(
        "Wrote {} listings to {csv_path} and {parquet_path}",
        listings.len()
    );
    Ok(())
}
