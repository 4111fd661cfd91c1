use super::{Facet, RiskBudget, RiskColumn};

/// One tracked risk of a project, as it appears in the dashboard dataset.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RiskRecord {
    pub project_name: String,
    pub risk_name: String,
    pub data_extraction_date: String,
    pub task_creation_date: String,
    pub last_modified_date: String,
    pub wri_program: String,
    pub office: String,
    pub project_life_cycle_phase: String,
    pub risk_impact_category: String,
    pub risk_likelihood: String,
    pub risk_impact_level: String,
    pub risk_assessment: String,
    pub risk_strategy: String,
    pub risk_management_action: String,
    pub risk_budget: RiskBudget,
    pub risk_status: String,
    pub risk_owner: String,
    pub close_out_date: String,
}

impl RiskRecord {
    /// String form of a column, as read from the CSV.
    pub fn value(&self, column: RiskColumn) -> &str {
        match column {
            RiskColumn::ProjectName => &self.project_name,
            RiskColumn::RiskName => &self.risk_name,
            RiskColumn::DataExtractionDate => &self.data_extraction_date,
            RiskColumn::TaskCreationDate => &self.task_creation_date,
            RiskColumn::LastModifiedDate => &self.last_modified_date,
            RiskColumn::WriProgram => &self.wri_program,
            RiskColumn::Office => &self.office,
            RiskColumn::ProjectLifeCyclePhase => &self.project_life_cycle_phase,
            RiskColumn::RiskImpactCategory => &self.risk_impact_category,
            RiskColumn::RiskLikelihood => &self.risk_likelihood,
            RiskColumn::RiskImpactLevel => &self.risk_impact_level,
            RiskColumn::RiskAssessment => &self.risk_assessment,
            RiskColumn::RiskStrategy => &self.risk_strategy,
            RiskColumn::RiskManagementAction => &self.risk_management_action,
            RiskColumn::RiskBudget => self.risk_budget.raw(),
            RiskColumn::RiskStatus => &self.risk_status,
            RiskColumn::RiskOwner => &self.risk_owner,
            RiskColumn::CloseOutDate => &self.close_out_date,
        }
    }

    pub fn facet_value(&self, facet: Facet) -> &str {
        self.value(facet.column())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        RiskColumn::ALL.into_iter().map(|c| self.value(c))
    }
}
