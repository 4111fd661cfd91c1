use std::collections::HashMap;

use itertools::Itertools;

use super::{RiskColumn, RiskRecord};

/// How a filtered view was produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewSource {
    /// Facet, budget and text searches applied to the dataset.
    Filtered,
    /// Global override search over the whole dataset; every other selection was ignored.
    GlobalOverride { term: String },
}

/// Read-only subset of the dataset rows, in dataset order.
#[derive(Clone, Debug, PartialEq)]
pub struct FilteredView<'a> {
    source: ViewSource,
    rows: Vec<&'a RiskRecord>,
}

impl<'a> FilteredView<'a> {
    pub(in crate::domain::riskdata) fn new(source: ViewSource, rows: Vec<&'a RiskRecord>) -> Self {
        Self { source, rows }
    }

    pub fn source(&self) -> &ViewSource {
        &self.source
    }

    pub fn rows(&self) -> &[&'a RiskRecord] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a RiskRecord> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Occurrences of each value of a column, most frequent first.
    /// Ties keep the order in which values first appear. Empty cells are not counted.
    pub fn value_counts(&self, column: RiskColumn) -> Vec<(&'a str, usize)> {
        self.grouped(column, |_| Some(()))
            .into_iter()
            .filter(|(value, _)| !value.is_empty())
            .map(|(value, hits)| (value, hits.len()))
            .sorted_by(|(_, a), (_, b)| b.cmp(a))
            .collect()
    }

    /// Numeric budgets of the view; rows without one are left out.
    pub fn budgets(&self) -> Vec<f64> {
        self.iter().filter_map(|r| r.risk_budget.amount()).collect()
    }

    /// Numeric budgets grouped by a column, groups in first-seen order.
    pub fn budgets_by(&self, column: RiskColumn) -> Vec<(&'a str, Vec<f64>)> {
        self.grouped(column, |r| r.risk_budget.amount())
    }

    pub fn budget_totals_by(&self, column: RiskColumn) -> Vec<(&'a str, f64)> {
        self.budgets_by(column)
            .into_iter()
            .map(|(value, budgets)| (value, budgets.iter().sum()))
            .collect()
    }

    fn grouped<T>(
        &self,
        column: RiskColumn,
        extract: impl Fn(&RiskRecord) -> Option<T>,
    ) -> Vec<(&'a str, Vec<T>)> {
        let mut groups: Vec<(&'a str, Vec<T>)> = Vec::new();
        let mut index: HashMap<&'a str, usize> = HashMap::new();

        for row in self.iter() {
            let key = row.value(column);
            let position = *index.entry(key).or_insert_with(|| {
                groups.push((key, Vec::new()));
                groups.len() - 1
            });
            if let Some(item) = extract(row) {
                groups[position].1.push(item);
            }
        }

        groups
    }
}
