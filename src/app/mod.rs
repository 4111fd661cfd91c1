pub mod charts;
pub mod component_factory;
mod dashboard;
mod display_options;
mod extractor;
pub mod markdown;
mod risk_source;

pub use dashboard::{Dashboard, DashboardRequest};
pub use display_options::DisplayOptions;
pub use extractor::{
    CUSTOM_FIELD_NAMES, EXTRACTED_COLUMNS, ExtractedRiskRow, ExtractionError, ExtractionSummary,
    RISK_SECTION_NAMES, RiskExtractor, RiskRowSink, RiskRowSinkError,
};
pub use risk_source::{
    CustomFieldValue, Portfolio, ProjectRef, RiskSource, RiskSourceError, RiskTask, SectionRef,
};
