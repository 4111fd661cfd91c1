#![allow(dead_code)]

use mockall::mock;
use risk_dashboard::app::{
    Portfolio, ProjectRef, RiskSource, RiskSourceError, RiskTask, SectionRef,
};
use risk_dashboard::domain::riskdata::{Dataset, RiskBudget, RiskRecord};

mock! {
    pub RiskSource {}
    #[async_trait::async_trait]
    impl RiskSource for RiskSource {
        async fn portfolio(&self, portfolio_gid: &str) -> Result<Portfolio, RiskSourceError>;
        async fn portfolio_projects(&self, portfolio_gid: &str) -> Result<Vec<ProjectRef>, RiskSourceError>;
        async fn project_sections(&self, project_gid: &str) -> Result<Vec<SectionRef>, RiskSourceError>;
        async fn section_tasks(&self, section_gid: &str) -> Result<Vec<RiskTask>, RiskSourceError>;
    }
}

pub struct RiskRow<'a> {
    pub name: &'a str,
    pub project: &'a str,
    pub program: &'a str,
    pub office: &'a str,
    pub phase: &'a str,
    pub likelihood: &'a str,
    pub impact_level: &'a str,
    pub status: &'a str,
    pub budget: &'a str,
}

impl From<RiskRow<'_>> for RiskRecord {
    fn from(row: RiskRow<'_>) -> Self {
        RiskRecord {
            risk_name: row.name.to_string(),
            project_name: row.project.to_string(),
            wri_program: row.program.to_string(),
            office: row.office.to_string(),
            project_life_cycle_phase: row.phase.to_string(),
            risk_likelihood: row.likelihood.to_string(),
            risk_impact_level: row.impact_level.to_string(),
            risk_status: row.status.to_string(),
            risk_budget: RiskBudget::parse(row.budget),
            ..Default::default()
        }
    }
}

/// A small register spanning three offices, with one risk missing its budget.
pub fn risk_register() -> Dataset {
    let rows = [
        ("Flooding of field sites", "Water Atlas", "Water", "Kenya", "Delivery", "Likely", "High", "Open", "1200"),
        ("Data licensing delays", "Water Atlas", "Water", "Kenya", "Design", "Possible", "Medium", "Open", "300"),
        ("Currency devaluation", "Cities Hub", "Cities", "Brazil", "Delivery", "Likely", "High", "Closed", "5000"),
        ("Partner turnover", "Cities Hub", "Cities", "Brazil", "Closing", "Unlikely", "Low", "Open", ""),
        ("Permit revocation", "Forest Watch", "Forests", "Indonesia", "Design", "Possible", "High", "Open", "750"),
        ("Security incident", "Forest Watch", "Forests", "Indonesia", "Delivery", "Rare", "Medium", "Monitoring", "80"),
    ];

    Dataset::new(
        rows.into_iter()
            .map(
                |(name, project, program, office, phase, likelihood, impact_level, status, budget)| {
                    RiskRow {
                        name,
                        project,
                        program,
                        office,
                        phase,
                        likelihood,
                        impact_level,
                        status,
                        budget,
                    }
                    .into()
                },
            )
            .collect(),
    )
}

pub fn task(gid: &str, name: &str, fields: &[(&str, &str)]) -> RiskTask {
    RiskTask {
        gid: gid.to_string(),
        name: name.to_string(),
        created_at: "2024-01-10T09:00:00.000Z".to_string(),
        modified_at: "2024-02-11T10:00:00.000Z".to_string(),
        custom_fields: fields
            .iter()
            .map(|(name, value)| risk_dashboard::app::CustomFieldValue {
                name: name.to_string(),
                display_value: Some(value.to_string()),
            })
            .collect(),
    }
}
