mod asana_api_response;
mod asana_client;
mod csv_dataset_loader;
mod csv_risk_writer;

pub use asana_client::{AsanaAccessToken, AsanaClient, AsanaClientError};
pub use csv_dataset_loader::{CsvDatasetLoader, DatasetLoadError};
pub use csv_risk_writer::CsvRiskWriter;
