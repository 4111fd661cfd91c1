use std::collections::HashSet;

use super::filter_selection::contains_ignore_case;
use super::{Dataset, Facet, FilterSelection, FilteredView, RiskColumn, RiskRecord, ViewSource};

/// Columns searched by [`Dataset::global_override_search`].
pub const GLOBAL_SEARCH_COLUMNS: [RiskColumn; 4] = [
    RiskColumn::RiskName,
    RiskColumn::ProjectName,
    RiskColumn::WriProgram,
    RiskColumn::Office,
];

/// A single restriction built from a filter selection.
#[derive(Debug)]
enum RowPredicate<'s> {
    FacetIn(Facet, &'s HashSet<String>),
    BudgetAtMost(f64),
}

impl RowPredicate<'_> {
    fn matches(&self, record: &RiskRecord) -> bool {
        match self {
            RowPredicate::FacetIn(facet, selected) => selected.contains(record.facet_value(*facet)),
            // unbudgeted rows are not restricted by the ceiling
            RowPredicate::BudgetAtMost(ceiling) => record
                .risk_budget
                .amount()
                .is_none_or(|amount| amount <= *ceiling),
        }
    }
}

fn predicates_for(selection: &FilterSelection) -> Vec<RowPredicate<'_>> {
    let mut predicates: Vec<RowPredicate<'_>> = selection
        .active_facets()
        .map(|(facet, values)| RowPredicate::FacetIn(facet, values))
        .collect();

    if let Some(ceiling) = selection.budget_ceiling() {
        predicates.push(RowPredicate::BudgetAtMost(ceiling));
    }

    predicates
}

impl Dataset {
    /// Rows matching every active facet selection and the budget ceiling, then narrowed by
    /// each active text search in order.
    pub fn query(&self, selection: &FilterSelection) -> FilteredView<'_> {
        let predicates = predicates_for(selection);

        let mut rows: Vec<&RiskRecord> = if predicates.is_empty() {
            self.records().iter().collect()
        } else {
            self.records()
                .iter()
                .filter(|r| predicates.iter().all(|p| p.matches(r)))
                .collect()
        };

        for search in selection.active_searches() {
            rows.retain(|r| search.matches(r));
        }

        FilteredView::new(ViewSource::Filtered, rows)
    }

    /// Searches the whole dataset on risk name, project name, program and office, ignoring
    /// any filter selection. The result replaces the filtered view instead of narrowing it.
    pub fn global_override_search(&self, term: &str) -> FilteredView<'_> {
        let needle = term.to_lowercase();
        let rows = self
            .records()
            .iter()
            .filter(|r| {
                GLOBAL_SEARCH_COLUMNS
                    .iter()
                    .any(|c| contains_ignore_case(r.value(*c), &needle))
            })
            .collect();

        FilteredView::new(
            ViewSource::GlobalOverride {
                term: term.to_string(),
            },
            rows,
        )
    }
}
