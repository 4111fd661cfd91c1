use std::error::Error;

use thiserror::Error;

/// Remote system the risk register is extracted from.
#[async_trait::async_trait]
pub trait RiskSource {
    async fn portfolio(&self, portfolio_gid: &str) -> Result<Portfolio, RiskSourceError>;

    async fn portfolio_projects(
        &self,
        portfolio_gid: &str,
    ) -> Result<Vec<ProjectRef>, RiskSourceError>;

    async fn project_sections(&self, project_gid: &str)
    -> Result<Vec<SectionRef>, RiskSourceError>;

    async fn section_tasks(&self, section_gid: &str) -> Result<Vec<RiskTask>, RiskSourceError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Portfolio {
    pub gid: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectRef {
    pub gid: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionRef {
    pub gid: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RiskTask {
    pub gid: String,
    pub name: String,
    pub created_at: String,
    pub modified_at: String,
    pub custom_fields: Vec<CustomFieldValue>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomFieldValue {
    pub name: String,
    pub display_value: Option<String>,
}

impl RiskTask {
    /// Display value of the first custom field with that exact name; empty when the field is
    /// absent or has no value.
    pub fn custom_field(&self, name: &str) -> &str {
        self.custom_fields
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.display_value.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Error, Debug)]
pub enum RiskSourceError {
    #[error("error querying the risk source: {0}")]
    SourceError(Box<dyn Error + Send + Sync>),
}
