use serde::Serialize;

use crate::data::Rental;
use crate::recap::{humidity_recap, temperature_recap, RecapTable};

/// Headline metrics for one filtered range.
///
/// Sums over no rows are `0`; means over no rows are `None`.
/// Temperature and humidity are the mean of the per-date means, so every
/// day weighs the same however many hours it has.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Summary {
    pub total_users: u64,
    pub registered_users: u64,
    pub casual_users: u64,
    pub mean_temperature: Option<f64>,
    pub mean_humidity: Option<f64>,
}

pub fn summarize(rows: &[Rental]) -> Summary {
    Summary {
        total_users: rows.iter().map(|r| r.total).sum(),
        registered_users: rows.iter().map(|r| r.registered).sum(),
        casual_users: rows.iter().map(|r| r.casual).sum(),
        mean_temperature: mean_of_groups(&temperature_recap(rows)),
        mean_humidity: mean_of_groups(&humidity_recap(rows)),
    }
}

fn mean_of_groups<K>(table: &RecapTable<K>) -> Option<f64> {
    (!table.is_empty()).then(|| table.value_sum() / table.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_rows::rental;

    #[test]
    fn test_summary_over_rows() {
        let mut a = rental("2024-01-01", 0, 3, 7);
        let mut b = rental("2024-01-02", 0, 1, 9);
        a.temperature = 10.0;
        b.temperature = 20.0;
        a.humidity = 40.0;
        b.humidity = 60.0;

        let s = summarize(&[a, b]);
        assert_eq!(s.total_users, 20);
        assert_eq!(s.registered_users, 16);
        assert_eq!(s.casual_users, 4);
        assert_eq!(s.mean_temperature, Some(15.0));
        assert_eq!(s.mean_humidity, Some(50.0));
    }

    #[test]
    fn test_means_weigh_each_day_equally() {
        let mut rows = vec![
            rental("2024-01-01", 0, 1, 1),
            rental("2024-01-01", 1, 1, 1),
            rental("2024-01-02", 0, 1, 1),
        ];
        for (row, (t, h)) in rows.iter_mut().zip([(10.0, 30.0), (10.0, 50.0), (40.0, 80.0)]) {
            row.temperature = t;
            row.humidity = h;
        }

        let s = summarize(&rows);
        // daily temperature 10, 40; daily humidity 40, 80
        assert_eq!(s.mean_temperature, Some(25.0));
        assert_eq!(s.mean_humidity, Some(60.0));

        let daily = temperature_recap(&rows);
        assert_eq!(s.mean_temperature, Some(daily.value_sum() / daily.len() as f64));
    }

    #[test]
    fn test_summary_of_nothing() {
        let s = summarize(&[]);
        assert_eq!(s, Summary::default());
        assert_eq!(s.total_users, 0);
        assert!(s.mean_temperature.is_none());
        assert!(s.mean_humidity.is_none());
    }
}
