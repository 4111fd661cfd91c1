use std::fmt::{Display, Formatter};

use markdown_table::{Heading, HeadingAlignment};

use crate::app::charts::{BoxStats, HISTOGRAM_BINS, HistogramBin, box_stats_by, histogram};
use crate::domain::riskdata::{FilteredView, RiskColumn};

use super::{format_amount, render_table};

/// Budget breakdowns of a view: distribution, spread per impact level and totals.
#[derive(Clone, Debug, Default)]
pub struct BudgetSection {
    pub distribution: Vec<HistogramBin>,
    pub by_impact_level: Vec<BoxStats>,
    pub totals: Vec<BudgetTotals>,
}

#[derive(Clone, Debug, Default)]
pub struct BudgetTotals {
    pub title: String,
    pub column: String,
    pub rows: Vec<(String, f64)>,
}

impl BudgetTotals {
    fn new(title: &str, view: &FilteredView<'_>, column: RiskColumn) -> Self {
        Self {
            title: title.to_string(),
            column: column.header().to_uppercase(),
            rows: view
                .budget_totals_by(column)
                .into_iter()
                .map(|(value, total)| (value.to_string(), total))
                .collect(),
        }
    }
}

impl From<&FilteredView<'_>> for BudgetSection {
    fn from(view: &FilteredView<'_>) -> Self {
        Self {
            distribution: histogram(&view.budgets(), HISTOGRAM_BINS),
            by_impact_level: box_stats_by(view, RiskColumn::RiskImpactLevel),
            totals: vec![
                BudgetTotals::new("Budget by Impact Level", view, RiskColumn::RiskImpactLevel),
                BudgetTotals::new("Budget by Office", view, RiskColumn::Office),
                BudgetTotals::new("Budget by WRI Program", view, RiskColumn::WriProgram),
            ],
        }
    }
}

impl BudgetSection {
    fn distribution_table(&self) -> String {
        let headers = vec![
            Heading::new("RISK BUDGET".to_string(), Some(HeadingAlignment::Left)),
            Heading::new("FREQUENCY".to_string(), Some(HeadingAlignment::Center)),
        ];

        let data = self
            .distribution
            .iter()
            .map(|bin| {
                vec![
                    format!("{} - {}", format_amount(bin.start), format_amount(bin.end)),
                    bin.count.to_string(),
                ]
            })
            .collect();

        format!("\n### Budget Distribution\n\n{}", render_table(headers, data))
    }

    fn impact_level_spread_table(&self) -> String {
        let headers = vec![
            Heading::new("RISK IMPACT LEVEL".to_string(), Some(HeadingAlignment::Left)),
            Heading::new("RISKS".to_string(), Some(HeadingAlignment::Center)),
            Heading::new("MIN".to_string(), Some(HeadingAlignment::Right)),
            Heading::new("Q1".to_string(), Some(HeadingAlignment::Right)),
            Heading::new("MEDIAN".to_string(), Some(HeadingAlignment::Right)),
            Heading::new("Q3".to_string(), Some(HeadingAlignment::Right)),
            Heading::new("MAX".to_string(), Some(HeadingAlignment::Right)),
        ];

        let data = self
            .by_impact_level
            .iter()
            .map(|s| {
                vec![
                    s.group.clone(),
                    s.count.to_string(),
                    format_amount(s.min),
                    format_amount(s.q1),
                    format_amount(s.median),
                    format_amount(s.q3),
                    format_amount(s.max),
                ]
            })
            .collect();

        format!("\n### Budget by Impact Level (spread)\n\n{}", render_table(headers, data))
    }
}

impl Display for BudgetTotals {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let headers = vec![
            Heading::new(self.column.clone(), Some(HeadingAlignment::Left)),
            Heading::new("BUDGET".to_string(), Some(HeadingAlignment::Right)),
        ];

        let data = self
            .rows
            .iter()
            .map(|(value, total)| vec![value.clone(), format_amount(*total)])
            .collect();

        write!(f, "\n### {}\n\n{}", self.title, render_table(headers, data))
    }
}

impl Display for BudgetSection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.distribution_table())?;
        f.write_str(&self.impact_level_spread_table())?;
        for totals in &self.totals {
            write!(f, "{totals}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::riskdata::{Dataset, FilterSelection, RiskBudget, RiskRecord};

    #[test]
    fn it_totals_budgets_per_office() {
        let dataset = Dataset::new(
            [("Kenya", "100"), ("Brazil", "40"), ("Kenya", "250.5")]
                .into_iter()
                .map(|(office, budget)| RiskRecord {
                    office: office.to_string(),
                    risk_budget: RiskBudget::parse(budget),
                    ..Default::default()
                })
                .collect(),
        );
        let view = dataset.query(&FilterSelection::new());

        let section = BudgetSection::from(&view);
        let markdown = section.to_string();

        assert_eq!(
            section.totals[1].rows,
            vec![("Kenya".to_string(), 350.5), ("Brazil".to_string(), 40.0)]
        );
        assert!(markdown.contains("### Budget by Office"));
        assert!(markdown.contains("350.50"));
        assert_eq!(section.distribution.len(), HISTOGRAM_BINS);
    }

    #[test]
    fn an_empty_view_renders_every_widget_without_data() {
        let dataset = Dataset::default();
        let view = dataset.query(&FilterSelection::new());

        let markdown = BudgetSection::from(&view).to_string();

        assert_eq!(markdown.matches("_No data_").count(), 5);
    }
}
