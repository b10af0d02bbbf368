//! Per-category statistics over an aggregation.
//!
//! Used for the `--summary` table printed after each chart.

use super::series_builder::Aggregation;
use log::debug;

/// Totals for one category
///
/// **Public** - returned from calculate_category_totals
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// Category name
    pub category: String,

    /// Sum of all weights in the series, widened so any `i64` input fits
    pub total: i128,

    /// Largest single weight in the series
    pub peak: i64,

    /// Number of entries in the series, back-fill included
    pub samples: usize,

    /// Share of the grand total, in percent
    pub percentage: f64,
}

/// Calculate per-category totals
///
/// **Public** - main entry point for metrics calculation
///
/// # Returns
/// One entry per category, sorted by total (descending). Ties keep
/// first-seen order.
pub fn calculate_category_totals(aggregation: &Aggregation) -> Vec<CategoryTotal> {
    debug!("Calculating totals for {} categories", aggregation.category_count());

    let grand_total: i128 = aggregation
        .iter()
        .map(|(_, values)| series_total(values))
        .sum();

    let mut totals: Vec<CategoryTotal> = aggregation
        .iter()
        .map(|(category, values)| {
            let total = series_total(values);
            CategoryTotal {
                category: category.to_string(),
                total,
                peak: values.iter().copied().max().unwrap_or(0),
                samples: values.len(),
                percentage: if grand_total != 0 {
                    (total as f64 / grand_total as f64) * 100.0
                } else {
                    0.0
                },
            }
        })
        .collect();

    // Stable sort keeps first-seen order for equal totals
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

fn series_total(values: &[i64]) -> i128 {
    values.iter().map(|&v| i128::from(v)).sum()
}

/// Render the category totals as a text table
pub fn generate_text_summary(aggregation: &Aggregation, max_lines: usize) -> String {
    let totals = calculate_category_totals(aggregation);
    let mut lines = Vec::new();

    lines.push(format!(
        "  {} timestamps, {} categories",
        aggregation.timestamps().len(),
        totals.len()
    ));
    lines.push(format!(
        "  {:<30} {:>12} {:>10} {:>8} {:>7}",
        "Category", "Total", "Peak", "Samples", "%"
    ));
    lines.push(format!("  {}", "-".repeat(71)));

    for entry in totals.iter().take(max_lines) {
        let name = if entry.category.chars().count() > 30 {
            let head: String = entry.category.chars().take(27).collect();
            format!("{}...", head)
        } else {
            entry.category.clone()
        };
        lines.push(format!(
            "  {:<30} {:>12} {:>10} {:>8} {:>6.1}%",
            name, entry.total, entry.peak, entry.samples, entry.percentage
        ));
    }

    if totals.len() > max_lines {
        lines.push(format!(
            "  (Showing top {} of {} categories)",
            max_lines,
            totals.len()
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate;
    use crate::parser::Row;

    fn sample() -> Aggregation {
        aggregate(vec![
            Row::new("t1", "A", 6),
            Row::new("t1", "B", 2),
            Row::new("t2", "A", 2),
            Row::new("t2", "C", 10),
        ])
    }

    #[test]
    fn test_calculate_category_totals() {
        let totals = calculate_category_totals(&sample());

        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].category, "C");
        assert_eq!(totals[0].total, 10);
        assert_eq!(totals[0].samples, 2); // one back-fill zero
        assert_eq!(totals[0].percentage, 50.0);
        assert_eq!(totals[1].category, "A");
        assert_eq!(totals[1].peak, 6);
        assert_eq!(totals[2].category, "B");
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let agg = aggregate(vec![Row::new("t1", "x", 1), Row::new("t1", "y", 1)]);
        let totals = calculate_category_totals(&agg);
        assert_eq!(totals[0].category, "x");
        assert_eq!(totals[1].category, "y");
    }

    #[test]
    fn test_totals_beyond_i64_range() {
        let agg = aggregate(vec![
            Row::new("t1", "A", i64::MAX),
            Row::new("t1", "B", 1),
            Row::new("t2", "A", i64::MAX),
        ]);

        let totals = calculate_category_totals(&agg);

        assert_eq!(totals[0].category, "A");
        assert_eq!(totals[0].total, 2 * i128::from(i64::MAX));
        assert_eq!(totals[0].peak, i64::MAX);
        assert!(totals[0].percentage > 99.0);
        assert_eq!(totals[1].total, 1);
    }

    #[test]
    fn test_totals_with_opposite_extremes() {
        let agg = aggregate(vec![Row::new("t1", "A", i64::MIN), Row::new("t2", "A", i64::MAX)]);
        let totals = calculate_category_totals(&agg);
        assert_eq!(totals[0].total, -1);
    }

    #[test]
    fn test_totals_empty() {
        let totals = calculate_category_totals(&Aggregation::default());
        assert!(totals.is_empty());
    }

    #[test]
    fn test_zero_grand_total() {
        let agg = aggregate(vec![Row::new("t1", "x", 0)]);
        let totals = calculate_category_totals(&agg);
        assert_eq!(totals[0].percentage, 0.0);
    }

    #[test]
    fn test_text_summary_truncates() {
        let summary = generate_text_summary(&sample(), 2);
        assert!(summary.contains("2 timestamps, 3 categories"));
        assert!(summary.contains("Showing top 2 of 3 categories"));
        assert!(!summary.contains(" B "));
    }
}
