use crate::shared::icons::icon;
use contracts::shared::formatting::{format_currency, format_percent, format_thousands};
use contracts::shared::indicators::{IndicatorStatus, StatItem, ValueFormat};
use leptos::prelude::*;

fn format_value(val: f64, fmt: &ValueFormat) -> String {
    match fmt {
        ValueFormat::Money { currency } => format_currency(val, currency),
        ValueFormat::Percent => format_percent(val),
        ValueFormat::Integer => format_thousands(val.round() as i64),
    }
}

#[component]
pub fn StatCard(item: StatItem) -> impl IntoView {
    let status_class = match item.status {
        IndicatorStatus::Good => "stat-card stat-card--success",
        IndicatorStatus::Bad => "stat-card stat-card--error",
        IndicatorStatus::Warning => "stat-card stat-card--warning",
        IndicatorStatus::Neutral => "stat-card",
    };
    let formatted = format_value(item.value, &item.format);

    view! {
        <div class=status_class>
            <div class="stat-card__icon">
                {icon(&item.icon)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{item.label}</div>
                <div class="stat-card__value">{formatted}</div>
                {item.subtitle.map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}

/// Placeholder card shown while the summary loads
#[component]
pub fn StatCardSkeleton() -> impl IntoView {
    view! {
        <div class="stat-card stat-card--skeleton">
            <div class="skeleton skeleton--circle"></div>
            <div class="stat-card__content">
                <div class="skeleton skeleton--line" style="width: 60%;"></div>
                <div class="skeleton skeleton--line" style="width: 40%; height: 22px;"></div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_per_kind() {
        assert_eq!(
            format_value(1_250_000.0, &ValueFormat::Money { currency: "COP".into() }),
            "1.250.000 COP"
        );
        assert_eq!(format_value(12.0, &ValueFormat::Integer), "12");
        assert_eq!(format_value(4500.0, &ValueFormat::Integer), "4.500");
    }
}
