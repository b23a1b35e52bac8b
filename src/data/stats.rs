use std::fmt;

/// Which of the three statistics a table should print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Min,
    Avg,
    Max,
}

impl Stat {
    pub const ALL: [Stat; 3] = [Stat::Min, Stat::Avg, Stat::Max];
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Min => write!(f, "Minimum"),
            Stat::Avg => write!(f, "Average"),
            Stat::Max => write!(f, "Maximum"),
        }
    }
}

/// Minimum, arithmetic mean and maximum of a non-empty set of prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl Stats {
    /// Summarise `prices`; `None` when there are none.
    pub fn from_prices(prices: impl IntoIterator<Item = f64>) -> Option<Stats> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for price in prices {
            count += 1;
            sum += price;
            min = min.min(price);
            max = max.max(price);
        }
        if count == 0 {
            return None;
        }
        Some(Stats {
            min,
            avg: sum / count as f64,
            max,
        })
    }

    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Min => self.min,
            Stat::Avg => self.avg,
            Stat::Max => self.max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_stats() {
        assert_eq!(Stats::from_prices(Vec::new()), None);
    }

    #[test]
    fn mean_is_sum_over_count() {
        let stats = Stats::from_prices([100.0, 200.0, 30.0]).unwrap();
        assert_eq!(stats.min, 30.0);
        assert_eq!(stats.max, 200.0);
        assert_eq!(stats.avg, 110.0);
        assert_eq!(stats.get(Stat::Avg), 110.0);
    }
}
