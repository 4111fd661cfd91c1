use std::collections::HashMap;

use super::{Facet, FacetValues, RiskRecord};

/// Step used by budget controls when moving between the range bounds.
pub const BUDGET_STEP: f64 = 100.0;

/// Lowest and highest numeric budget found in a dataset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

impl BudgetRange {
    pub fn step(&self) -> f64 {
        BUDGET_STEP
    }
}

/// Options available to every filter control, derived from the full dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct FacetOptions {
    values: HashMap<Facet, FacetValues>,
    budget_range: Option<BudgetRange>,
}

impl FacetOptions {
    fn derive_from(records: &[RiskRecord]) -> Self {
        let values = Facet::ALL
            .into_iter()
            .map(|facet| {
                let distinct = records.iter().map(|r| r.facet_value(facet)).collect();
                (facet, distinct)
            })
            .collect();

        let budget_range = records
            .iter()
            .filter_map(|r| r.risk_budget.amount())
            .fold(None, |range: Option<BudgetRange>, amount| {
                Some(match range {
                    None => BudgetRange {
                        min: amount,
                        max: amount,
                    },
                    Some(r) => BudgetRange {
                        min: r.min.min(amount),
                        max: r.max.max(amount),
                    },
                })
            });

        Self {
            values,
            budget_range,
        }
    }

    pub fn values(&self, facet: Facet) -> &FacetValues {
        // every facet is derived at construction time
        &self.values[&facet]
    }

    pub fn budget_range(&self) -> Option<BudgetRange> {
        self.budget_range
    }
}

/// The risk records loaded for a session. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    records: Vec<RiskRecord>,
    options: FacetOptions,
}

impl Dataset {
    pub fn new(records: Vec<RiskRecord>) -> Self {
        let options = FacetOptions::derive_from(&records);
        Self { records, options }
    }

    pub fn records(&self) -> &[RiskRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn facet_options(&self) -> &FacetOptions {
        &self.options
    }

    /// Distinct values of a facet across the whole dataset, in first-seen order.
    pub fn facet_values(&self, facet: Facet) -> &FacetValues {
        self.options.values(facet)
    }

    pub fn budget_range(&self) -> Option<BudgetRange> {
        self.options.budget_range()
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::riskdata::RiskBudget;

    fn record(office: &str, program: &str, budget: &str) -> RiskRecord {
        RiskRecord {
            office: office.to_string(),
            wri_program: program.to_string(),
            risk_budget: RiskBudget::parse(budget),
            ..Default::default()
        }
    }

    #[test]
    fn it_derives_facet_values_in_first_seen_order() {
        let dataset = Dataset::new(vec![
            record("B", "P1", "100"),
            record("A", "P2", "500"),
            record("B", "P1", "50"),
        ]);

        assert_eq!(dataset.facet_values(Facet::Office).as_slice(), ["B", "A"]);
        assert_eq!(dataset.facet_values(Facet::WriProgram).as_slice(), ["P1", "P2"]);
        assert_eq!(dataset.facet_values(Facet::RiskStatus).as_slice(), [""]);
    }

    #[test]
    fn it_derives_the_budget_range_ignoring_non_numeric_cells() {
        let dataset = Dataset::new(vec![
            record("A", "P1", "100"),
            record("A", "P1", "not budgeted"),
            record("A", "P1", "2,500"),
            record("A", "P1", "50"),
        ]);

        assert_eq!(
            dataset.budget_range(),
            Some(BudgetRange {
                min: 50.0,
                max: 2500.0
            })
        );
    }

    #[test]
    fn it_has_no_budget_range_without_numeric_budgets() {
        let dataset = Dataset::new(vec![record("A", "P1", ""), record("B", "P2", "tbd")]);

        assert_eq!(dataset.budget_range(), None);
    }

    #[test]
    fn an_empty_dataset_has_empty_facets() {
        let dataset = Dataset::default();

        assert!(dataset.is_empty());
        for facet in Facet::ALL {
            assert!(dataset.facet_values(facet).is_empty());
        }
        assert_eq!(dataset.budget_range(), None);
    }
}
