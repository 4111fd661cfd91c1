use serde::Deserialize;

/// Presentation settings, handed to the dashboard when it is built.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayOptions {
    pub page_title: String,
    /// Rows shown by every data table; all rows when unset.
    pub max_rows: Option<usize>,
    /// Cells longer than this are cut and end with `…`; untouched when unset.
    pub max_colwidth: Option<usize>,
    pub show_phase_chart: bool,
    pub show_likelihood_chart: bool,
    pub show_impact_level_chart: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            page_title: "Project Risk Management Tool".to_string(),
            max_rows: None,
            max_colwidth: None,
            show_phase_chart: true,
            show_likelihood_chart: true,
            show_impact_level_chart: true,
        }
    }
}

impl DisplayOptions {
    pub fn fit_cell(&self, value: &str) -> String {
        match self.max_colwidth {
            Some(width) if value.chars().count() > width => {
                let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
                cut.push('…');
                cut
            }
            _ => value.to_string(),
        }
    }
}
