use leptos::prelude::*;

/// Section header: title, record counter and the action buttons passed as children
#[component]
pub fn PageHeader(
    #[prop(into)]
    title: String,

    #[prop(optional, into)]
    subtitle: MaybeProp<String>,

    /// Total shown in the badge next to the title (hidden while `None`)
    #[prop(optional, into)]
    count: Option<Signal<usize>>,

    children: Children,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <div class="page-header__content">
                <div class="page-header__text">
                    <h1 class="page-header__title">
                        {title}
                        {move || count.map(|n| view! {
                            <span class="page-header__badge">{n.get()}</span>
                        })}
                    </h1>
                    {move || subtitle.get().map(|s| view! {
                        <div class="page-header__subtitle">{s}</div>
                    })}
                </div>
            </div>
            <div class="page-header__actions">
                {children()}
            </div>
        </div>
    }
}
