use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Columns of the filterable risk dataset, in the order they appear in the CSV.
#[derive(PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Debug)]
pub enum RiskColumn {
    ProjectName,
    RiskName,
    DataExtractionDate,
    TaskCreationDate,
    LastModifiedDate,
    WriProgram,
    Office,
    ProjectLifeCyclePhase,
    RiskImpactCategory,
    RiskLikelihood,
    RiskImpactLevel,
    RiskAssessment,
    RiskStrategy,
    RiskManagementAction,
    RiskBudget,
    RiskStatus,
    RiskOwner,
    CloseOutDate,
}

impl RiskColumn {
    pub const ALL: [RiskColumn; 18] = [
        RiskColumn::ProjectName,
        RiskColumn::RiskName,
        RiskColumn::DataExtractionDate,
        RiskColumn::TaskCreationDate,
        RiskColumn::LastModifiedDate,
        RiskColumn::WriProgram,
        RiskColumn::Office,
        RiskColumn::ProjectLifeCyclePhase,
        RiskColumn::RiskImpactCategory,
        RiskColumn::RiskLikelihood,
        RiskColumn::RiskImpactLevel,
        RiskColumn::RiskAssessment,
        RiskColumn::RiskStrategy,
        RiskColumn::RiskManagementAction,
        RiskColumn::RiskBudget,
        RiskColumn::RiskStatus,
        RiskColumn::RiskOwner,
        RiskColumn::CloseOutDate,
    ];

    /// Header text used in the handoff CSV.
    pub fn header(&self) -> &'static str {
        match self {
            RiskColumn::ProjectName => "Project Name",
            RiskColumn::RiskName => "Risk Name",
            RiskColumn::DataExtractionDate => "Data Extraction Date",
            RiskColumn::TaskCreationDate => "Task Creation Date",
            RiskColumn::LastModifiedDate => "Last Modified Date",
            RiskColumn::WriProgram => "WRI Program",
            RiskColumn::Office => "Office",
            RiskColumn::ProjectLifeCyclePhase => "Project Life Cycle Phase",
            RiskColumn::RiskImpactCategory => "Risk Impact Category",
            RiskColumn::RiskLikelihood => "Risk Likelihood",
            RiskColumn::RiskImpactLevel => "Risk Impact Level",
            RiskColumn::RiskAssessment => "Risk Assessment",
            RiskColumn::RiskStrategy => "Risk Strategy",
            RiskColumn::RiskManagementAction => "Risk Management Action",
            RiskColumn::RiskBudget => "Risk Budget",
            RiskColumn::RiskStatus => "Risk Status",
            RiskColumn::RiskOwner => "Risk Owner",
            RiskColumn::CloseOutDate => "Close Out Date",
        }
    }

    fn kebab_name(&self) -> String {
        self.header().to_lowercase().replace(' ', "-")
    }
}

impl Display for RiskColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown column: {0:?}")]
pub struct UnknownColumn(pub String);

impl FromStr for RiskColumn {
    type Err = UnknownColumn;

    /// Accepts either the CSV header (`Risk Name`) or its kebab-case form (`risk-name`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RiskColumn::ALL
            .into_iter()
            .find(|c| c.header().eq_ignore_ascii_case(wanted) || c.kebab_name() == wanted)
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

/// Categorical columns that can be used as filter dimensions.
#[derive(PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Debug)]
pub enum Facet {
    WriProgram,
    Office,
    ProjectLifeCyclePhase,
    RiskLikelihood,
    RiskImpactLevel,
    RiskAssessment,
    RiskStatus,
}

impl Facet {
    pub const ALL: [Facet; 7] = [
        Facet::WriProgram,
        Facet::Office,
        Facet::ProjectLifeCyclePhase,
        Facet::RiskLikelihood,
        Facet::RiskImpactLevel,
        Facet::RiskAssessment,
        Facet::RiskStatus,
    ];

    pub fn column(&self) -> RiskColumn {
        match self {
            Facet::WriProgram => RiskColumn::WriProgram,
            Facet::Office => RiskColumn::Office,
            Facet::ProjectLifeCyclePhase => RiskColumn::ProjectLifeCyclePhase,
            Facet::RiskLikelihood => RiskColumn::RiskLikelihood,
            Facet::RiskImpactLevel => RiskColumn::RiskImpactLevel,
            Facet::RiskAssessment => RiskColumn::RiskAssessment,
            Facet::RiskStatus => RiskColumn::RiskStatus,
        }
    }
}

impl Display for Facet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.column().fmt(f)
    }
}
