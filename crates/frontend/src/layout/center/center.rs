use crate::domain::a001_photo::ui::list::PhotoList;
use crate::domain::a002_hotel::ui::list::HotelList;
use crate::domain::a003_wholesaler::ui::list::WholesalerList;
use crate::domain::a004_date_restriction::ui::list::DateRestrictionList;
use crate::domain::a005_route::ui::list::RouteList;
use crate::domain::a006_service::ui::list::ServiceList;
use crate::domain::a007_trip::ui::list::TripList;
use crate::layout::global_context::{AppGlobalContext, Section};
use leptos::prelude::*;

/// Renders the active section. Switching sections drops the previous one's state.
#[component]
pub fn Center() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        <div data-zone="center" class="app-main" style="flex: 1; overflow: auto;">
            {move || match ctx.active.get() {
                Section::Photos => view! { <PhotoList /> }.into_any(),
                Section::Hotels => view! { <HotelList /> }.into_any(),
                Section::Wholesalers => view! { <WholesalerList /> }.into_any(),
                Section::DateRestrictions => view! { <DateRestrictionList /> }.into_any(),
                Section::Routes => view! { <RouteList /> }.into_any(),
                Section::Services => view! { <ServiceList /> }.into_any(),
                Section::Trips => view! { <TripList /> }.into_any(),
            }}
        </div>
    }
}
