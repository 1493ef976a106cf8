use crate::shared::api_client::EntityClient;
use crate::shared::section::EntitySection;
use contracts::domain::a002_hotel::aggregate::Hotel;
use leptos::prelude::*;

#[component]
pub fn HotelList() -> impl IntoView {
    view! {
        <EntitySection
            client={EntityClient::<Hotel>::from_config()}
            subtitle="Hoteles registrados y su proveedor"
        />
    }
}
