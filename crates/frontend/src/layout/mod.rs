pub mod center;
pub mod global_context;
pub mod left;
pub mod top_header;

use leptos::prelude::*;
use top_header::TopHeader;

/// Application shell.
///
/// ```text
/// +-------------------------------+
/// |           TopHeader           |
/// +-------------------------------+
/// |  Sidebar  |      Center       |
/// +-------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <left::Left>
                    <left::Sidebar />
                </left::Left>
                <center::Center />
            </div>
        </div>
    }
}
