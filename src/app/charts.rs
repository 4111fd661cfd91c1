use crate::domain::riskdata::{FilteredView, RiskColumn};

/// Bins used by the budget histogram.
pub const HISTOGRAM_BINS: usize = 20;

#[derive(Clone, Debug, PartialEq)]
pub struct Proportion {
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

/// Share of each value of a column among the rows that have one, most frequent first.
pub fn proportions(view: &FilteredView<'_>, column: RiskColumn) -> Vec<Proportion> {
    let counts = view.value_counts(column);
    let total: usize = counts.iter().map(|(_, count)| count).sum();
    counts
        .into_iter()
        .map(|(label, count)| Proportion {
            label: label.to_string(),
            count,
            percent: count as f64 * 100.0 / total as f64,
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width bins between the lowest and highest value. A single bin when every value is
/// the same, no bins without values.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let Some((min, max)) = bounds(values) else {
        return Vec::new();
    };

    if bins == 0 || min == max {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for value in values {
        let index = (((value - min) / width).floor() as usize).min(bins - 1);
        histogram[index].count += 1;
    }

    histogram
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoxStats {
    pub group: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Five-number summary of the budgets of each group; groups without budgets are left out.
pub fn box_stats_by(view: &FilteredView<'_>, column: RiskColumn) -> Vec<BoxStats> {
    view.budgets_by(column)
        .into_iter()
        .filter_map(|(group, budgets)| box_stats(group, budgets))
        .collect()
}

fn box_stats(group: &str, mut values: Vec<f64>) -> Option<BoxStats> {
    let (min, max) = bounds(&values)?;
    values.sort_by(f64::total_cmp);

    Some(BoxStats {
        group: group.to_string(),
        count: values.len(),
        min,
        q1: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q3: quantile(&values, 0.75),
        max,
    })
}

/// Linear interpolation between closest ranks; `sorted` must not be empty.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let position = p * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, v| match acc {
        None => Some((*v, *v)),
        Some((min, max)) => Some((v.min(min), v.max(max))),
    })
}
