use crate::domain::riskdata::{Dataset, FacetOptions, FilterSelection, FilteredView};

use super::DisplayOptions;
use super::markdown::MarkdownDashboard;

/// What the user asked for in one render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardRequest {
    pub selection: FilterSelection,
    /// When set and non-empty, replaces the filtered view with a search over the whole dataset.
    pub global_search: Option<String>,
}

impl DashboardRequest {
    pub fn new(selection: FilterSelection) -> Self {
        Self {
            selection,
            global_search: None,
        }
    }

    pub fn with_global_search(mut self, term: impl Into<String>) -> Self {
        self.global_search = Some(term.into());
        self
    }

    fn active_global_search(&self) -> Option<&str> {
        self.global_search.as_deref().filter(|t| !t.is_empty())
    }
}

/// The loaded dataset plus the presentation settings it is rendered with.
pub struct Dashboard {
    dataset: Dataset,
    options: DisplayOptions,
}

impl Dashboard {
    pub fn new(dataset: Dataset, options: DisplayOptions) -> Self {
        Self { dataset, options }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Values offered by the filter controls, always taken from the full dataset.
    pub fn facet_options(&self) -> &FacetOptions {
        self.dataset.facet_options()
    }

    /// A request without restrictions, budget ceiling at the dataset maximum.
    pub fn default_request(&self) -> DashboardRequest {
        DashboardRequest::new(FilterSelection::for_dataset(&self.dataset))
    }

    pub fn view(&self, request: &DashboardRequest) -> FilteredView<'_> {
        match request.active_global_search() {
            Some(term) => self.dataset.global_override_search(term),
            None => self.dataset.query(&request.selection),
        }
    }

    pub fn render(&self, request: &DashboardRequest) -> String {
        MarkdownDashboard::new(&self.view(request), &self.options).to_string()
    }
}
