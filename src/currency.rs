use std::fmt::Write as _;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Static conversion table
// ---------------------------------------------------------------------------

/// Currency code → units per US dollar. Display order is table order.
pub const CONVERSIONS: [(&str, f64); 8] = [
    ("USD", 1.0),
    ("EUR", 0.9),
    ("CAD", 1.4),
    ("GBP", 0.8),
    ("CHF", 0.95),
    ("NZD", 1.66),
    ("AUD", 1.62),
    ("JPY", 107.92),
];

const COLUMN_WIDTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurrencyError {
    #[error("unknown currency code '{0}'")]
    UnknownCurrency(String),

    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(f64),
}

fn rate(code: &str) -> Result<f64, CurrencyError> {
    CONVERSIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|&(_, r)| r)
        .ok_or_else(|| CurrencyError::UnknownCurrency(code.to_string()))
}

/// Whether `code` is one of the currencies in [`CONVERSIONS`].
pub fn is_known(code: &str) -> bool {
    rate(code).is_ok()
}

/// Convert `quantity` of `source` into `target`.
pub fn convert(quantity: f64, source: &str, target: &str) -> Result<f64, CurrencyError> {
    let from = rate(source)?;
    let to = rate(target)?;
    if quantity <= 0.0 || quantity.is_nan() {
        return Err(CurrencyError::NonPositiveQuantity(quantity));
    }
    Ok(quantity / from * to)
}

/// Conversion table from `home` into every known currency, for 10 to 90
/// units in steps of 10.
pub fn options_table(home: &str) -> Result<String, CurrencyError> {
    let mut out = format!("Options for converting from {home}:\n");
    let header: String = CONVERSIONS
        .iter()
        .map(|(code, _)| format!("{code:<COLUMN_WIDTH$}"))
        .collect();
    out.push_str(header.trim_end());
    out.push('\n');

    for quantity in (10..100).step_by(10) {
        let mut line = String::new();
        for (target, _) in CONVERSIONS {
            let value = convert(f64::from(quantity), home, target)?;
            let _ = write!(line, "{value:<COLUMN_WIDTH$.2}");
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn converts_through_dollars() {
        assert!(close(convert(10.0, "GBP", "USD").unwrap(), 12.5));
        assert!(close(convert(10.0, "GBP", "EUR").unwrap(), 11.25));
        assert!(close(convert(90.0, "GBP", "JPY").unwrap(), 12141.0));
        assert!(close(convert(42.0, "CHF", "CHF").unwrap(), 42.0));
    }

    #[test]
    fn rejects_unknown_codes_and_bad_quantities() {
        assert_eq!(
            convert(10.0, "MON", "USD"),
            Err(CurrencyError::UnknownCurrency("MON".into()))
        );
        assert_eq!(
            convert(0.0, "USD", "EUR"),
            Err(CurrencyError::NonPositiveQuantity(0.0))
        );
        assert!(!is_known("usd"));
        assert!(is_known("JPY"));
    }

    #[test]
    fn options_table_layout() {
        let table = options_table("GBP").unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "Options for converting from GBP:");
        assert_eq!(
            lines[1],
            "USD       EUR       CAD       GBP       CHF       NZD       AUD       JPY"
        );
        assert!(lines[2].starts_with("12.50     11.25     17.50     10.00     "));
        assert!(lines[10].ends_with("12141.00"));
    }

    #[test]
    fn options_table_needs_a_known_home_currency() {
        assert!(options_table("XYZ").is_err());
    }
}
