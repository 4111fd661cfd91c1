use std::error::Error;

use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::risk_source::{Portfolio, ProjectRef, RiskSource, RiskSourceError, RiskTask};

/// Sections holding risk tasks. The first one found in a project is used.
pub const RISK_SECTION_NAMES: [&str; 2] = ["ACTIVE RISKS", "INACTIVE RISKS"];

/// Header of the file produced by the extractor.
pub const EXTRACTED_COLUMNS: [&str; 23] = [
    "Portfolio Name",
    "Portfolio ID",
    "Project Name",
    "Project ID",
    "Risk Name",
    "Risk ID",
    "Link to the risk",
    "Data Extraction Date",
    "Task Creation Date",
    "Last Modified Date",
    "WRI Program",
    "Office",
    "Project Life Cycle Phase",
    "Risk Impact Category",
    "Risk Likelihood",
    "Risk Impact Level",
    "Risk Assessment",
    "Risk Strategy",
    "Risk Management Action",
    "Risk Budget",
    "Risk Status",
    "Risk Owner",
    "Close Out Date",
];

/// Custom fields copied into each row, named as they are in the task tracker.
pub const CUSTOM_FIELD_NAMES: [&str; 13] = [
    "WRI Program",
    "Office",
    "Project Life Cycle Phase ",
    "Risk Impact Category",
    "Risk Likelihood",
    "Risk Impact Level",
    "Risk Assessment",
    "Risk Strategy",
    "Risk Management Action",
    "Risk Budget (USD)",
    "Risk Status",
    "Risk Owner",
    "Close Out Date",
];

const EXTRACTION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TASK_LINK_BASE: &str = "https://app.asana.com/0";

/// One risk task flattened into the extractor's fixed columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractedRiskRow {
    pub portfolio_name: String,
    pub portfolio_id: String,
    pub project_name: String,
    pub project_id: String,
    pub risk_name: String,
    pub risk_id: String,
    pub link: String,
    pub data_extraction_date: String,
    pub task_creation_date: String,
    pub last_modified_date: String,
    /// Values of [`CUSTOM_FIELD_NAMES`], same order.
    pub custom_fields: Vec<String>,
}

impl ExtractedRiskRow {
    fn from_task(portfolio: &Portfolio, project: &ProjectRef, task: RiskTask, extracted_at: &str) -> Self {
        let custom_fields = CUSTOM_FIELD_NAMES
            .iter()
            .map(|name| task.custom_field(name).to_string())
            .collect();

        Self {
            portfolio_name: portfolio.name.clone(),
            portfolio_id: portfolio.gid.clone(),
            project_name: project.name.clone(),
            project_id: project.gid.clone(),
            link: format!("{TASK_LINK_BASE}/{}/{}", project.gid, task.gid),
            risk_name: task.name,
            risk_id: task.gid,
            data_extraction_date: extracted_at.to_string(),
            task_creation_date: task.created_at,
            last_modified_date: task.modified_at,
            custom_fields,
        }
    }

    /// Cells in [`EXTRACTED_COLUMNS`] order. Missing custom fields are empty cells.
    pub fn cells(&self) -> Vec<&str> {
        let mut cells = vec![
            self.portfolio_name.as_str(),
            self.portfolio_id.as_str(),
            self.project_name.as_str(),
            self.project_id.as_str(),
            self.risk_name.as_str(),
            self.risk_id.as_str(),
            self.link.as_str(),
            self.data_extraction_date.as_str(),
            self.task_creation_date.as_str(),
            self.last_modified_date.as_str(),
        ];
        cells.extend(
            (0..CUSTOM_FIELD_NAMES.len())
                .map(|i| self.custom_fields.get(i).map_or("", String::as_str)),
        );
        cells
    }

    pub fn cell(&self, column: &str) -> Option<&str> {
        let position = EXTRACTED_COLUMNS.iter().position(|c| *c == column)?;
        self.cells().get(position).copied()
    }
}

/// Destination of the extracted rows.
pub trait RiskRowSink {
    fn write_header(&mut self) -> Result<(), RiskRowSinkError>;
    fn write_row(&mut self, row: &ExtractedRiskRow) -> Result<(), RiskRowSinkError>;
}

#[derive(Error, Debug)]
pub enum RiskRowSinkError {
    #[error("error writing extracted rows: {0}")]
    WriteError(Box<dyn Error + Send + Sync>),
}

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("risk source error: {0}")]
    Source(#[from] RiskSourceError),

    #[error("output error: {0}")]
    Output(#[from] RiskRowSinkError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub projects: usize,
    pub projects_without_risk_section: usize,
    pub rows_written: usize,
}

pub struct RiskExtractor<S> {
    source: S,
    extracted_at: NaiveDateTime,
}

impl<S> RiskExtractor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            extracted_at: Local::now().naive_local(),
        }
    }

    /// Timestamp written in the `Data Extraction Date` column of every row.
    pub fn with_extraction_time(mut self, extracted_at: NaiveDateTime) -> Self {
        self.extracted_at = extracted_at;
        self
    }
}

impl<S> RiskExtractor<S>
where
    S: RiskSource + Sync,
{
    /// Writes every risk task of the portfolio to the sink. Any source or sink error aborts
    /// the run; rows written before the error stay in the sink.
    pub async fn extract_into(
        &self,
        portfolio_gid: &str,
        sink: &mut impl RiskRowSink,
    ) -> Result<ExtractionSummary, ExtractionError> {
        let extracted_at = self.extracted_at.format(EXTRACTION_DATE_FORMAT).to_string();
        let mut summary = ExtractionSummary::default();

        let portfolio = self.source.portfolio(portfolio_gid).await?;
        info!("extracting risks of portfolio {} ({})", portfolio.name, portfolio.gid);

        sink.write_header()?;

        for project in self.source.portfolio_projects(portfolio_gid).await? {
            summary.projects += 1;

            let sections = self.source.project_sections(&project.gid).await?;
            let Some(section) = sections
                .iter()
                .find(|s| RISK_SECTION_NAMES.contains(&s.name.as_str()))
            else {
                warn!(
                    "project {} ({}) has no risk section, skipping it",
                    project.name, project.gid
                );
                summary.projects_without_risk_section += 1;
                continue;
            };

            debug!(
                "reading section {} ({}) of project {}",
                section.name, section.gid, project.name
            );

            for task in self.source.section_tasks(&section.gid).await? {
                let row = ExtractedRiskRow::from_task(&portfolio, &project, task, &extracted_at);
                sink.write_row(&row)?;
                summary.rows_written += 1;
            }
        }

        info!(
            "extracted {} risks from {} projects",
            summary.rows_written, summary.projects
        );

        Ok(summary)
    }
}
