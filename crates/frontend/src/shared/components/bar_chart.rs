use contracts::shared::aggregation::Chart;
use leptos::prelude::*;

/// Horizontal bars; widths are relative to the largest bucket.
#[component]
pub fn BarChart(chart: Chart) -> impl IntoView {
    let widths = chart.bar_widths();
    let empty = chart.is_empty();
    let rows = chart
        .buckets
        .into_iter()
        .zip(widths)
        .map(|(bucket, width)| {
            view! {
                <div class="bar-chart__row">
                    <span class="bar-chart__label" title=bucket.label.clone()>{bucket.label.clone()}</span>
                    <div class="bar-chart__track">
                        <div class="bar-chart__bar" style=format!("width: {:.1}%;", width)></div>
                    </div>
                    <span class="bar-chart__value">{bucket.count}</span>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="bar-chart">
            <h3 class="bar-chart__title">{chart.title}</h3>
            {if empty {
                view! { <div class="bar-chart__empty">"Sin datos para mostrar"</div> }.into_any()
            } else {
                view! { <div class="bar-chart__rows">{rows}</div> }.into_any()
            }}
        </div>
    }
}

#[component]
pub fn BarChartSkeleton() -> impl IntoView {
    view! {
        <div class="bar-chart bar-chart--skeleton">
            <div class="skeleton skeleton--line" style="width: 45%;"></div>
            {(0..5)
                .map(|i| {
                    view! {
                        <div class="skeleton skeleton--line" style=format!("width: {}%;", 90 - i * 12)></div>
                    }
                })
                .collect_view()}
        </div>
    }
}
