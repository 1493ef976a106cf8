use crate::shared::icons::icon;
use contracts::shared::pagination::{PageQuery, Pager, PagerStep};
use leptos::prelude::*;

/// Pager shared by every entity table. Buttons and the size selector emit the
/// `PageQuery` to go to; disabled buttons have no target.
#[component]
pub fn PaginationControls(
    #[prop(into)]
    pager: Signal<Pager>,

    on_navigate: Callback<PageQuery>,

    /// Available page size options (defaults to the configured list)
    #[prop(optional)]
    page_size_options: Option<Vec<usize>>,
) -> impl IntoView {
    let page_size_opts =
        page_size_options.unwrap_or_else(|| crate::config::config().page_size_options.clone());

    let step_button = move |step: PagerStep| {
        let target = move || pager.with(|p| p.step(step));
        view! {
            <button
                class="pagination-btn"
                on:click=move |_| {
                    if let Some(query) = target() {
                        on_navigate.run(query);
                    }
                }
                disabled=move || target().is_none()
                title=step.title()
            >
                {icon(step.icon())}
            </button>
        }
    };
    let (back, forward) = PagerStep::ALL.split_at(2);

    view! {
        <div class="pagination-controls">
            {back.iter().copied().map(step_button).collect_view()}
            <span class="pagination-info">{move || pager.with(Pager::label)}</span>
            {forward.iter().copied().map(step_button).collect_view()}
            <select
                class="page-size-select"
                on:change=move |ev| {
                    let resized = event_target_value(&ev)
                        .parse()
                        .ok()
                        .and_then(|size| pager.with(|p| p.resize(size)));
                    if let Some(query) = resized {
                        on_navigate.run(query);
                    }
                }
                prop:value=move || pager.with(|p| p.size.to_string())
            >
                {page_size_opts.into_iter().map(|size| {
                    view! {
                        <option value=size.to_string() selected=move || pager.with(|p| p.size == size)>
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
