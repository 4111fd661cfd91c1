pub mod column;
pub mod dataset;
pub mod facet_values;
pub mod filter_selection;
pub mod filtered_view;
pub mod query;
pub mod risk_budget;
pub mod risk_record;

pub use column::{Facet, RiskColumn, UnknownColumn};
pub use dataset::{BudgetRange, Dataset, FacetOptions};
pub use facet_values::FacetValues;
pub use filter_selection::{FilterSelection, TextSearch};
pub use filtered_view::{FilteredView, ViewSource};
pub use risk_budget::RiskBudget;
pub use risk_record::RiskRecord;
