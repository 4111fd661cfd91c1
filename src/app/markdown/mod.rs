mod markdown_budget_section;
mod markdown_proportion_table;
mod markdown_risk_table;

use std::fmt::{Display, Formatter};

use markdown_table::{Heading, MarkdownTable};

pub use markdown_budget_section::{BudgetSection, BudgetTotals};
pub use markdown_proportion_table::{ProportionTable, RankedCountTable};
pub use markdown_risk_table::RiskTable;

use crate::app::DisplayOptions;
use crate::domain::riskdata::{FilteredView, RiskColumn, ViewSource};

const NO_DATA: &str = "_No data_\n";

/// Markdown rendering of every dashboard widget for one filtered view.
#[derive(Clone, Debug, Default)]
pub struct MarkdownDashboard {
    pub title: String,
    pub banner: Option<String>,
    pub risk_count: usize,
    pub offices: ProportionTable,
    pub programs: ProportionTable,
    pub budget: BudgetSection,
    pub phases: Option<RankedCountTable>,
    pub likelihood: Option<ProportionTable>,
    pub impact_levels: Option<ProportionTable>,
    pub table: RiskTable,
}

impl MarkdownDashboard {
    pub fn new(view: &FilteredView<'_>, options: &DisplayOptions) -> Self {
        let banner = match view.source() {
            ViewSource::Filtered => None,
            ViewSource::GlobalOverride { term } => Some(format!(
                "> Showing global search results for \"{term}\" across risk, project, WRI program and office. Filters are not applied."
            )),
        };

        Self {
            title: options.page_title.clone(),
            banner,
            risk_count: view.len(),
            offices: ProportionTable::new("Office Distribution", view, RiskColumn::Office),
            programs: ProportionTable::new("WRI Program Distribution", view, RiskColumn::WriProgram),
            budget: BudgetSection::from(view),
            phases: options.show_phase_chart.then(|| {
                RankedCountTable::new(
                    "Risk Count by Project Life Cycle Phase",
                    view,
                    RiskColumn::ProjectLifeCyclePhase,
                )
            }),
            likelihood: options.show_likelihood_chart.then(|| {
                ProportionTable::new("Risk Distribution by Likelihood", view, RiskColumn::RiskLikelihood)
            }),
            impact_levels: options.show_impact_level_chart.then(|| {
                ProportionTable::new(
                    "Risk Distribution by Impact Level",
                    view,
                    RiskColumn::RiskImpactLevel,
                )
            }),
            table: RiskTable::new(view, options),
        }
    }
}

impl Display for MarkdownDashboard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "# {}\n", self.title)?;
        if let Some(banner) = &self.banner {
            writeln!(f, "{banner}\n")?;
        }
        writeln!(f, "_{} risks in view_", self.risk_count)?;

        write!(f, "\n## Data by offices and divisions\n")?;
        write!(f, "{}{}{}", self.offices, self.programs, self.table)?;

        write!(f, "\n## Budget related content\n")?;
        write!(f, "{}{}", self.budget, self.table)?;

        write!(f, "\n## Combined content\n")?;
        if let Some(phases) = &self.phases {
            write!(f, "{phases}")?;
        }
        if let Some(likelihood) = &self.likelihood {
            write!(f, "{likelihood}")?;
        }
        if let Some(impact_levels) = &self.impact_levels {
            write!(f, "{impact_levels}")?;
        }
        write!(f, "{}", self.table)
    }
}

/// Renders a table, or a placeholder when there are no rows to show.
fn render_table(headers: Vec<Heading>, data: Vec<Vec<String>>) -> String {
    if data.is_empty() {
        return NO_DATA.to_string();
    }

    let mut table = MarkdownTable::new(data);
    table.with_headings(headers);
    table.as_markdown().unwrap_or_default()
}

fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}
