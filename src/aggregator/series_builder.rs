//! Build per-category weight series from timestamped rows.
//!
//! Rows arrive grouped by timestamp. Every timestamp transition appends a
//! label to the timestamp sequence; every row appends its weight to its
//! category's series. A category seen for the first time is back-filled with
//! one zero per timestamp that preceded the current one.
//!
//! Example input:
//! ```text
//! t1,A,5
//! t1,B,3
//! t2,A,2
//! t3,C,7
//! ```
//! gives `timestamps = [t1, t2, t3]`, `A = [5, 2]`, `B = [3]`, `C = [0, 0, 7]`.
//! Series are not padded at the end, so they may differ in length.

use crate::parser::Row;
use crate::utils::error::ParseError;
use log::{debug, info};
use std::collections::HashMap;

/// Timestamp sequence plus category series, aligned by position
///
/// **Public** - consumed by the chart renderer and the JSON export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    timestamps: Vec<String>,
    /// Category series in first-seen order
    series: Vec<(String, Vec<i64>)>,
}

impl Aggregation {
    /// Timestamps in input order, one per transition
    pub fn timestamps(&self) -> &[String] {
        &self.timestamps
    }

    /// Series of one category, if it was seen
    pub fn series(&self, category: &str) -> Option<&[i64]> {
        self.series
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, values)| values.as_slice())
    }

    /// Category names in first-seen order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|(name, _)| name.as_str())
    }

    /// `(category, series)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[i64])> {
        self.series
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn category_count(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty() && self.series.is_empty()
    }

    /// A category's series forced to exactly `len` entries
    ///
    /// Missing trailing entries become zero and surplus entries are dropped,
    /// so ragged series line up with the timestamp axis when drawn.
    pub fn padded_series(values: &[i64], len: usize) -> Vec<i64> {
        let mut padded: Vec<i64> = values.iter().copied().take(len).collect();
        padded.resize(len, 0);
        padded
    }
}

/// Single-pass accumulator behind [`aggregate`]
///
/// **Public** - use directly when rows are produced incrementally
#[derive(Debug, Default)]
pub struct SeriesAggregator {
    timestamps: Vec<String>,
    series: Vec<(String, Vec<i64>)>,
    index: HashMap<String, usize>,
    last_timestamp: Option<String>,
    /// Timestamp transitions seen so far, including the current one
    samples: usize,
}

impl SeriesAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one row
    pub fn push(&mut self, row: Row) {
        let Row {
            timestamp,
            category,
            weight,
        } = row;

        if self.last_timestamp.as_deref() != Some(timestamp.as_str()) {
            self.samples += 1;
            self.timestamps.push(timestamp.clone());
            self.last_timestamp = Some(timestamp);
        }

        let slot = match self.index.get(&category) {
            Some(&slot) => slot,
            None => {
                // Zeros for the timestamps before the current one only.
                let backfill = self.samples.saturating_sub(1);
                debug!("New category {:?} (back-filled with {} zeros)", category, backfill);
                self.index.insert(category.clone(), self.series.len());
                self.series.push((category, vec![0; backfill]));
                self.series.len() - 1
            }
        };

        self.series[slot].1.push(weight);
    }

    /// Number of timestamp transitions seen so far
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Consume the accumulator
    pub fn finish(self) -> Aggregation {
        debug!(
            "Aggregated {} timestamps across {} categories",
            self.timestamps.len(),
            self.series.len()
        );
        for (category, values) in &self.series {
            debug!("  {}: {} samples", category, values.len());
        }

        Aggregation {
            timestamps: self.timestamps,
            series: self.series,
        }
    }
}

/// Aggregate an ordered sequence of rows
///
/// **Public** - main entry point for aggregation
pub fn aggregate(rows: impl IntoIterator<Item = Row>) -> Aggregation {
    let mut aggregator = SeriesAggregator::new();
    for row in rows {
        aggregator.push(row);
    }
    aggregator.finish()
}

/// Aggregate rows straight from a fallible reader
///
/// Stops at the first error; no partial result is returned.
///
/// # Errors
/// Whatever error the row source yields first
pub fn try_aggregate(
    rows: impl IntoIterator<Item = Result<Row, ParseError>>,
) -> Result<Aggregation, ParseError> {
    let mut aggregator = SeriesAggregator::new();
    for row in rows {
        aggregator.push(row?);
    }

    let aggregation = aggregator.finish();
    info!(
        "{} timestamps, {} categories",
        aggregation.timestamps().len(),
        aggregation.category_count()
    );
    Ok(aggregation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(data: &[(&str, &str, i64)]) -> Vec<Row> {
        data.iter().map(|&(t, c, w)| Row::new(t, c, w)).collect()
    }

    #[test]
    fn test_category_at_first_timestamp_has_no_backfill() {
        let agg = aggregate(rows(&[("t1", "A", 5), ("t1", "B", 3), ("t2", "A", 2)]));

        assert_eq!(agg.timestamps(), ["t1", "t2"]);
        assert_eq!(agg.series("A"), Some(&[5, 2][..]));
        assert_eq!(agg.series("B"), Some(&[3][..]));
    }

    #[test]
    fn test_late_category_backfill_counts_preceding_timestamps() {
        let agg = aggregate(rows(&[
            ("t1", "A", 1),
            ("t2", "A", 1),
            ("t3", "B", 4),
        ]));

        assert_eq!(agg.series("B"), Some(&[0, 0, 4][..]));
    }

    #[test]
    fn test_repeated_category_within_timestamp_appends() {
        let agg = aggregate(rows(&[("t1", "A", 1), ("t1", "A", 2)]));

        assert_eq!(agg.timestamps(), ["t1"]);
        assert_eq!(agg.series("A"), Some(&[1, 2][..]));
    }

    #[test]
    fn test_returning_timestamp_is_a_new_transition() {
        let agg = aggregate(rows(&[("t1", "A", 1), ("t2", "A", 2), ("t1", "A", 3)]));
        assert_eq!(agg.timestamps(), ["t1", "t2", "t1"]);
    }

    #[test]
    fn test_samples_tracks_transitions() {
        let mut aggregator = SeriesAggregator::new();
        assert_eq!(aggregator.samples(), 0);
        aggregator.push(Row::new("t1", "A", 1));
        aggregator.push(Row::new("t1", "B", 1));
        assert_eq!(aggregator.samples(), 1);
        aggregator.push(Row::new("t2", "B", 1));
        assert_eq!(aggregator.samples(), 2);
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let agg = aggregate(rows(&[("t1", "z", 1), ("t1", "a", 1), ("t2", "m", 1)]));
        assert_eq!(agg.categories().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_empty_input() {
        let agg = aggregate(Vec::new());
        assert!(agg.is_empty());
        assert_eq!(agg.category_count(), 0);
    }

    #[test]
    fn test_try_aggregate_stops_at_error() {
        let input = vec![
            Ok(Row::new("t1", "A", 1)),
            Err(ParseError::FieldCount { line: 2, found: 1 }),
            Ok(Row::new("t2", "A", 1)),
        ];

        let err = try_aggregate(input).unwrap_err();
        assert!(matches!(err, ParseError::FieldCount { line: 2, .. }));
    }

    #[test]
    fn test_padded_series() {
        assert_eq!(Aggregation::padded_series(&[1, 2], 4), vec![1, 2, 0, 0]);
        assert_eq!(Aggregation::padded_series(&[1, 2, 3], 2), vec![1, 2]);
        assert_eq!(Aggregation::padded_series(&[], 0), Vec::<i64>::new());
    }
}
