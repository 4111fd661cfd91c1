use std::fmt::{Display, Formatter};

/// Budget cell of a risk record: the text as extracted plus the amount it parses to.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RiskBudget {
    raw: String,
    amount: Option<f64>,
}

impl RiskBudget {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let amount = parse_amount(&raw);
        Self { raw, amount }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `None` when the cell is empty or does not hold a non-negative number.
    pub fn amount(&self) -> Option<f64> {
        self.amount
    }
}

impl From<f64> for RiskBudget {
    fn from(value: f64) -> Self {
        Self::parse(value.to_string())
    }
}

impl Display for RiskBudget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).replace(',', "");
    let amount: f64 = digits.trim().parse().ok()?;

    (amount.is_finite() && amount >= 0.0).then_some(amount)
}
