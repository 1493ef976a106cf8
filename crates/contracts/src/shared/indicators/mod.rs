use crate::shared::aggregation::percent_of_total;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Stat card values
// ---------------------------------------------------------------------------

/// How to format the numeric value on the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    Money { currency: String },
    Percent,
    Integer,
}

/// Visual status of the card (drives colour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorStatus {
    Good,
    Bad,
    Neutral,
    Warning,
}

/// One stat card of a section summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatItem {
    pub label: String,
    pub icon: String,
    pub value: f64,
    pub format: ValueFormat,
    pub status: IndicatorStatus,
    /// Secondary text below the value, e.g. share of the total.
    pub subtitle: Option<String>,
}

impl StatItem {
    pub fn count(label: &str, icon: &str, value: usize) -> Self {
        Self {
            label: label.to_string(),
            icon: icon.to_string(),
            value: value as f64,
            format: ValueFormat::Integer,
            status: IndicatorStatus::Neutral,
            subtitle: None,
        }
    }

    /// Count with its share of `total` as subtitle.
    pub fn share(label: &str, icon: &str, value: usize, total: usize) -> Self {
        let pct = percent_of_total(value, total);
        Self {
            subtitle: Some(format!("{} del total", crate::shared::formatting::format_percent(pct))),
            ..Self::count(label, icon, value)
        }
    }

    pub fn money(label: &str, icon: &str, value: f64, currency: &str) -> Self {
        Self {
            label: label.to_string(),
            icon: icon.to_string(),
            value,
            format: ValueFormat::Money {
                currency: currency.to_string(),
            },
            status: IndicatorStatus::Neutral,
            subtitle: None,
        }
    }

    pub fn percent(label: &str, icon: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            icon: icon.to_string(),
            value,
            format: ValueFormat::Percent,
            status: IndicatorStatus::Neutral,
            subtitle: None,
        }
    }

    pub fn with_status(mut self, status: IndicatorStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_subtitle_handles_empty_total() {
        let item = StatItem::share("Activos", "check", 0, 0);
        assert_eq!(item.subtitle.as_deref(), Some("0% del total"));
        let item = StatItem::share("Activos", "check", 3, 4);
        assert_eq!(item.subtitle.as_deref(), Some("75% del total"));
    }
}
