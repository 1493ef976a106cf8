//! Summary statistics and chart buckets computed from display records.

use crate::shared::formatting::month_abbrev;
use chrono::{DateTime, Datelike, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Months shown by the trend chart, current month included.
pub const TREND_MONTHS: usize = 6;

/// A named aggregation slot holding a count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

impl Bucket {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Bar chart data: a title and its buckets in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub buckets: Vec<Bucket>,
}

impl Chart {
    pub fn new(title: impl Into<String>, buckets: Vec<Bucket>) -> Self {
        Self {
            title: title.into(),
            buckets,
        }
    }

    /// Bar widths in percent, relative to the largest bucket.
    pub fn bar_widths(&self) -> Vec<f64> {
        let values: Vec<usize> = self.buckets.iter().map(|b| b.count).collect();
        percent_of_max(&values)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| b.count == 0)
    }
}

pub fn count_where<T>(rows: &[T], pred: impl Fn(&T) -> bool) -> usize {
    rows.iter().filter(|r| pred(r)).count()
}

/// Counts rows per category. Every category appears, in the given order, even with zero rows.
/// Rows whose key matches no category are not counted.
pub fn group_counts<T, K: PartialEq>(
    rows: &[T],
    categories: &[(K, &str)],
    key: impl Fn(&T) -> K,
) -> Vec<Bucket> {
    let mut counts = vec![0usize; categories.len()];
    for row in rows {
        let k = key(row);
        if let Some(idx) = categories.iter().position(|(c, _)| *c == k) {
            counts[idx] += 1;
        }
    }
    categories
        .iter()
        .zip(counts)
        .map(|((_, label), count)| Bucket::new(*label, count))
        .collect()
}

/// The `limit` most frequent labels, by count descending then label ascending.
pub fn top_counts<T>(rows: &[T], limit: usize, label: impl Fn(&T) -> String) -> Vec<Bucket> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in rows {
        *counts.entry(label(row)).or_default() += 1;
    }
    let mut buckets: Vec<Bucket> = counts
        .into_iter()
        .map(|(label, count)| Bucket::new(label, count))
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    buckets.truncate(limit);
    buckets
}

/// `(year, month)` pairs for the trailing `TREND_MONTHS` months, oldest first.
fn trailing_months(now: DateTime<FixedOffset>) -> Vec<(i32, u32)> {
    let current = now.year() * 12 + now.month0() as i32;
    (0..TREND_MONTHS as i32)
        .rev()
        .map(|back| {
            let idx = current - back;
            (idx.div_euclid(12), idx.rem_euclid(12) as u32 + 1)
        })
        .collect()
}

/// Counts rows per calendar month over the last six months, oldest to newest.
///
/// Months are those of the user's wall clock (`now`'s offset). Always returns
/// `TREND_MONTHS` buckets. Rows without a timestamp, or outside the window,
/// are ignored.
pub fn monthly_trend<T>(
    rows: &[T],
    now: DateTime<FixedOffset>,
    timestamp: impl Fn(&T) -> Option<DateTime<Utc>>,
) -> Vec<Bucket> {
    let months = trailing_months(now);
    let mut counts = vec![0usize; months.len()];
    for row in rows {
        let Some(ts) = timestamp(row) else { continue };
        let ts = ts.with_timezone(now.offset());
        let key = (ts.year(), ts.month());
        if let Some(idx) = months.iter().position(|m| *m == key) {
            counts[idx] += 1;
        }
    }
    months
        .into_iter()
        .zip(counts)
        .map(|((_, month), count)| Bucket::new(month_abbrev(month), count))
        .collect()
}

/// Each value as a percentage of the largest one. All zeros (or no values) give all zeros.
pub fn percent_of_max(values: &[usize]) -> Vec<f64> {
    let max = values.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|v| *v as f64 / max as f64 * 100.0)
        .collect()
}

/// `part / total * 100`, or 0 when `total` is 0.
pub fn percent_of_total(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_percent_of_max_all_zero() {
        assert_eq!(percent_of_max(&[0, 0, 0]), vec![0.0, 0.0, 0.0]);
        assert!(percent_of_max(&[]).is_empty());
    }

    #[test]
    fn test_percent_of_max_largest_is_hundred() {
        let widths = percent_of_max(&[2, 8, 4, 0]);
        assert_eq!(widths, vec![25.0, 100.0, 50.0, 0.0]);
        assert!(widths.iter().all(|w| w.is_finite()));
    }

    #[test]
    fn test_percent_of_total_zero_total() {
        assert_eq!(percent_of_total(0, 0), 0.0);
        assert_eq!(percent_of_total(3, 4), 75.0);
    }

    #[test]
    fn test_monthly_trend_has_six_buckets_oldest_first() {
        let now = at(2024, 3, 20);
        let rows = vec![
            at(2024, 3, 1),
            at(2024, 3, 15),
            at(2024, 1, 10),
            at(2023, 10, 31),
            at(2023, 9, 30), // outside the window
        ];
        let buckets = monthly_trend(&rows, now.fixed_offset(), |r| Some(*r));
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["oct", "nov", "dic", "ene", "feb", "mar"]);
        let counts: Vec<usize> = buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 0, 0, 1, 0, 2]);
    }

    #[test]
    fn test_monthly_trend_empty_input() {
        let buckets = monthly_trend::<DateTime<Utc>>(&[], at(2024, 12, 1).fixed_offset(), |r| Some(*r));
        assert_eq!(buckets.len(), TREND_MONTHS);
        assert!(buckets.iter().all(|b| b.count == 0));
        assert_eq!(buckets.last().map(|b| b.label.as_str()), Some("dic"));
        assert_eq!(buckets.first().map(|b| b.label.as_str()), Some("jul"));
    }

    #[test]
    fn test_monthly_trend_buckets_by_local_month() {
        let bogota = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = at(2024, 3, 20).with_timezone(&bogota);
        // 02:00 UTC on March 1st is still February 29th in Bogotá
        let rows = vec![Utc.with_ymd_and_hms(2024, 3, 1, 2, 0, 0).unwrap()];
        let buckets = monthly_trend(&rows, now, |r| Some(*r));
        assert_eq!(buckets[4].label, "feb");
        assert_eq!(buckets[4].count, 1);
        assert_eq!(buckets[5].count, 0);
    }

    #[test]
    fn test_group_counts_keeps_every_category() {
        let stars = vec![5u8, 5, 3, 1];
        let categories = [(1u8, "1★"), (2, "2★"), (3, "3★"), (4, "4★"), (5, "5★")];
        let buckets = group_counts(&stars, &categories, |s| *s);
        let counts: Vec<usize> = buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 0, 1, 0, 2]);
        assert_eq!(buckets[4].label, "5★");
    }

    #[test]
    fn test_top_counts_orders_by_count() {
        let rows = vec!["b", "a", "b", "c", "a", "b"];
        let buckets = top_counts(&rows, 2, |r| r.to_string());
        assert_eq!(buckets, vec![Bucket::new("b", 3), Bucket::new("a", 2)]);
    }

    #[test]
    fn test_chart_bar_widths() {
        let chart = Chart::new("x", vec![Bucket::new("a", 0), Bucket::new("b", 0)]);
        assert!(chart.is_empty());
        assert_eq!(chart.bar_widths(), vec![0.0, 0.0]);
    }
}
