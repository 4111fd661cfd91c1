use std::fmt::{Display, Formatter};

use markdown_table::{Heading, HeadingAlignment};

use crate::app::charts::{Proportion, proportions};
use crate::domain::riskdata::{FilteredView, RiskColumn};

use super::render_table;

/// Share of each value of a column, rendered as a pie-chart style breakdown.
#[derive(Clone, Debug, Default)]
pub struct ProportionTable {
    pub title: String,
    pub column: String,
    pub rows: Vec<Proportion>,
}

impl ProportionTable {
    pub fn new(title: &str, view: &FilteredView<'_>, column: RiskColumn) -> Self {
        Self {
            title: title.to_string(),
            column: column.header().to_uppercase(),
            rows: proportions(view, column),
        }
    }
}

impl Display for ProportionTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let headers = vec![
            Heading::new(self.column.clone(), Some(HeadingAlignment::Left)),
            Heading::new("COUNT".to_string(), Some(HeadingAlignment::Center)),
            Heading::new("SHARE".to_string(), Some(HeadingAlignment::Right)),
        ];

        let data = self
            .rows
            .iter()
            .map(|p| {
                vec![
                    p.label.clone(),
                    p.count.to_string(),
                    format!("{:.1}%", p.percent),
                ]
            })
            .collect();

        write!(f, "\n### {}\n\n{}", self.title, render_table(headers, data))
    }
}

/// Risk count per value of a column, highest count first.
#[derive(Clone, Debug, Default)]
pub struct RankedCountTable {
    pub title: String,
    pub column: String,
    pub rows: Vec<(String, usize)>,
}

impl RankedCountTable {
    pub fn new(title: &str, view: &FilteredView<'_>, column: RiskColumn) -> Self {
        Self {
            title: title.to_string(),
            column: column.header().to_uppercase(),
            rows: view
                .value_counts(column)
                .into_iter()
                .map(|(value, count)| (value.to_string(), count))
                .collect(),
        }
    }
}

impl Display for RankedCountTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let headers = vec![
            Heading::new(self.column.clone(), Some(HeadingAlignment::Left)),
            Heading::new("COUNT".to_string(), Some(HeadingAlignment::Center)),
        ];

        let data = self
            .rows
            .iter()
            .map(|(value, count)| vec![value.clone(), count.to_string()])
            .collect();

        write!(f, "\n### {}\n\n{}", self.title, render_table(headers, data))
    }
}
