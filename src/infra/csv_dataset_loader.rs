use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::riskdata::{Dataset, RiskBudget, RiskColumn, RiskRecord};

#[derive(Error, Debug)]
pub enum DatasetLoadError {
    #[error("unable to open dataset {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error reading csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("malformed row {row}: {source}")]
    MalformedRow { row: usize, source: csv::Error },
}

/// Loads the handoff CSV into a [`Dataset`], keeping only the dashboard columns.
#[derive(Clone, Copy, Debug, Default)]
pub struct CsvDatasetLoader;

impl CsvDatasetLoader {
    pub fn load(&self, path: &Path) -> Result<Dataset, DatasetLoadError> {
        let file = File::open(path).map_err(|source| DatasetLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = self.load_from_reader(file)?;
        info!("loaded {} risks from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn load_from_reader(&self, reader: impl Read) -> Result<Dataset, DatasetLoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let positions = column_positions(&headers)?;
        debug!("csv columns resolved: {positions:?}");

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row.map_err(|source| DatasetLoadError::MalformedRow {
                row: index + 1,
                source,
            })?;
            records.push(to_record(&row, &positions));
        }

        Ok(Dataset::new(records))
    }
}

/// Index of every [`RiskColumn`] in the header row, in [`RiskColumn::ALL`] order. Extra columns
/// such as the identifiers and link written by the extractor are ignored.
fn column_positions(headers: &csv::StringRecord) -> Result<Vec<usize>, DatasetLoadError> {
    let mut positions = Vec::with_capacity(RiskColumn::ALL.len());
    let mut missing = Vec::new();

    for column in RiskColumn::ALL {
        match headers.iter().position(|h| h.trim() == column.header()) {
            Some(position) => positions.push(position),
            None => missing.push(column.header().to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(DatasetLoadError::MissingColumns(missing));
    }
    Ok(positions)
}

fn to_record(row: &csv::StringRecord, positions: &[usize]) -> RiskRecord {
    let cell = |column: RiskColumn| -> String {
        positions
            .get(column as usize)
            .and_then(|&p| row.get(p))
            .unwrap_or_default()
            .to_string()
    };

    RiskRecord {
        project_name: cell(RiskColumn::ProjectName),
        risk_name: cell(RiskColumn::RiskName),
        data_extraction_date: cell(RiskColumn::DataExtractionDate),
        task_creation_date: cell(RiskColumn::TaskCreationDate),
        last_modified_date: cell(RiskColumn::LastModifiedDate),
        wri_program: cell(RiskColumn::WriProgram),
        office: cell(RiskColumn::Office),
        project_life_cycle_phase: cell(RiskColumn::ProjectLifeCyclePhase),
        risk_impact_category: cell(RiskColumn::RiskImpactCategory),
        risk_likelihood: cell(RiskColumn::RiskLikelihood),
        risk_impact_level: cell(RiskColumn::RiskImpactLevel),
        risk_assessment: cell(RiskColumn::RiskAssessment),
        risk_strategy: cell(RiskColumn::RiskStrategy),
        risk_management_action: cell(RiskColumn::RiskManagementAction),
        risk_budget: RiskBudget::parse(cell(RiskColumn::RiskBudget)),
        risk_status: cell(RiskColumn::RiskStatus),
        risk_owner: cell(RiskColumn::RiskOwner),
        close_out_date: cell(RiskColumn::CloseOutDate),
    }
}
