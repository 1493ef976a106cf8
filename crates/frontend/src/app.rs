use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Navigation state shared by the sidebar, top bar and center.
    provide_context(AppGlobalContext::new());

    view! {
        <Shell />
    }
}
