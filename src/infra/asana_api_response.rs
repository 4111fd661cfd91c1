use serde::Deserialize;

use crate::app::{CustomFieldValue, Portfolio, ProjectRef, RiskTask, SectionRef};

/// Every Asana response wraps its payload in `data`; list endpoints add `next_page`.
#[derive(Debug, Deserialize)]
pub(super) struct AsanaEnvelope<T> {
    pub data: T,
    #[serde(default)]
    pub next_page: Option<AsanaNextPage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AsanaNextPage {
    pub offset: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct AsanaPortfolio {
    pub gid: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Compact record used for portfolio items and sections.
#[derive(Debug, Deserialize)]
pub(super) struct AsanaNamedResource {
    pub gid: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AsanaTask {
    pub gid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub custom_fields: Vec<AsanaCustomField>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AsanaCustomField {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_value: Option<String>,
}

impl From<AsanaPortfolio> for Portfolio {
    fn from(value: AsanaPortfolio) -> Self {
        Portfolio {
            gid: value.gid,
            name: value.name.unwrap_or_default(),
        }
    }
}

impl From<AsanaNamedResource> for ProjectRef {
    fn from(value: AsanaNamedResource) -> Self {
        ProjectRef {
            gid: value.gid,
            name: value.name.unwrap_or_default(),
        }
    }
}

impl From<AsanaNamedResource> for SectionRef {
    fn from(value: AsanaNamedResource) -> Self {
        SectionRef {
            gid: value.gid,
            name: value.name.unwrap_or_default(),
        }
    }
}

impl From<AsanaTask> for RiskTask {
    fn from(value: AsanaTask) -> Self {
        RiskTask {
            gid: value.gid,
            name: value.name.unwrap_or_default(),
            created_at: value.created_at.unwrap_or_default(),
            modified_at: value.modified_at.unwrap_or_default(),
            custom_fields: value
                .custom_fields
                .into_iter()
                .filter_map(|f| {
                    Some(CustomFieldValue {
                        name: f.name?,
                        display_value: f.display_value,
                    })
                })
                .collect(),
        }
    }
}
