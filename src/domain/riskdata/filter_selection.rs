use std::collections::{BTreeMap, HashSet};

use super::{Dataset, Facet, RiskColumn, RiskRecord};

/// A free-text search that narrows an already filtered view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextSearch {
    /// Case-insensitive substring match against one column.
    InColumn { column: RiskColumn, term: String },
    /// Case-insensitive substring match against any column of the row.
    Keyword(String),
}

impl TextSearch {
    pub fn term(&self) -> &str {
        match self {
            TextSearch::InColumn { term, .. } => term,
            TextSearch::Keyword(term) => term,
        }
    }

    /// An empty term does not restrict anything.
    pub fn is_active(&self) -> bool {
        !self.term().is_empty()
    }

    pub fn matches(&self, record: &RiskRecord) -> bool {
        let needle = self.term().to_lowercase();
        match self {
            TextSearch::InColumn { column, .. } => contains_ignore_case(record.value(*column), &needle),
            TextSearch::Keyword(_) => record.values().any(|v| contains_ignore_case(v, &needle)),
        }
    }
}

/// `needle` must already be lowercased.
pub(in crate::domain::riskdata) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// State of every filter control for one query.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSelection {
    facets: BTreeMap<Facet, HashSet<String>>,
    budget_ceiling: Option<f64>,
    searches: Vec<TextSearch>,
}

impl FilterSelection {
    /// A selection without restrictions and without a budget ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection without restrictions whose budget ceiling sits at the dataset maximum.
    /// The ceiling stays unset when the dataset has no numeric budgets.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        Self {
            budget_ceiling: dataset.budget_range().map(|r| r.max),
            ..Self::default()
        }
    }

    pub fn select<I, S>(mut self, facet: Facet, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facets
            .entry(facet)
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_budget_ceiling(mut self, ceiling: f64) -> Self {
        self.budget_ceiling = Some(ceiling);
        self
    }

    pub fn without_budget_ceiling(mut self) -> Self {
        self.budget_ceiling = None;
        self
    }

    pub fn search_in_column(mut self, column: RiskColumn, term: impl Into<String>) -> Self {
        self.searches.push(TextSearch::InColumn {
            column,
            term: term.into(),
        });
        self
    }

    pub fn search_keyword(mut self, term: impl Into<String>) -> Self {
        self.searches.push(TextSearch::Keyword(term.into()));
        self
    }

    pub fn selected(&self, facet: Facet) -> Option<&HashSet<String>> {
        self.facets.get(&facet)
    }

    /// Facets whose selected set is non-empty, in `Facet` order.
    pub fn active_facets(&self) -> impl Iterator<Item = (Facet, &HashSet<String>)> {
        self.facets
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(facet, values)| (*facet, values))
    }

    pub fn budget_ceiling(&self) -> Option<f64> {
        self.budget_ceiling
    }

    pub fn searches(&self) -> &[TextSearch] {
        &self.searches
    }

    pub fn active_searches(&self) -> impl Iterator<Item = &TextSearch> {
        self.searches.iter().filter(|s| s.is_active())
    }
}
