use std::fmt::{Display, Formatter};

use markdown_table::{Heading, HeadingAlignment};

use crate::app::DisplayOptions;
use crate::domain::riskdata::{FilteredView, RiskColumn};

use super::render_table;

/// Raw dump of the rows of a view.
#[derive(Clone, Debug, Default)]
pub struct RiskTable {
    pub rows: Vec<Vec<String>>,
    pub hidden_rows: usize,
}

impl RiskTable {
    pub fn new(view: &FilteredView<'_>, options: &DisplayOptions) -> Self {
        let shown = options.max_rows.unwrap_or(usize::MAX).min(view.len());

        let rows = view
            .iter()
            .take(shown)
            .map(|record| {
                record
                    .values()
                    .map(|v| options.fit_cell(v).replace('|', "\\|").replace('\n', " "))
                    .collect()
            })
            .collect();

        Self {
            rows,
            hidden_rows: view.len() - shown,
        }
    }
}

impl Display for RiskTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let headers = RiskColumn::ALL
            .iter()
            .map(|c| Heading::new(c.header().to_string(), Some(HeadingAlignment::Left)))
            .collect();

        write!(f, "\n### Data Table\n\n{}", render_table(headers, self.rows.clone()))?;

        if self.hidden_rows > 0 {
            write!(f, "\n_{} more rows not shown_\n", self.hidden_rows)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::riskdata::{Dataset, FilterSelection, RiskRecord};

    fn dataset() -> Dataset {
        Dataset::new(
            ["Flooding | storm surge", "Currency", "Staffing"]
                .into_iter()
                .map(|name| RiskRecord {
                    risk_name: name.to_string(),
                    ..Default::default()
                })
                .collect(),
        )
    }

    #[test]
    fn it_limits_the_rows_shown() {
        let dataset = dataset();
        let view = dataset.query(&FilterSelection::new());
        let options = DisplayOptions {
            max_rows: Some(2),
            ..Default::default()
        };

        let table = RiskTable::new(&view, &options);

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.hidden_rows, 1);
        assert!(table.to_string().contains("_1 more rows not shown_"));
    }

    #[test]
    fn it_escapes_pipes_in_cells() {
        let dataset = dataset();
        let view = dataset.query(&FilterSelection::new());

        let table = RiskTable::new(&view, &DisplayOptions::default());

        assert_eq!(table.rows[0][1], "Flooding \\| storm surge");
        assert_eq!(table.rows[0].len(), RiskColumn::ALL.len());
    }
}
