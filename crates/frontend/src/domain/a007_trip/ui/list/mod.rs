use crate::shared::api_client::EntityClient;
use crate::shared::section::EntitySection;
use contracts::domain::a007_trip::aggregate::Trip;
use leptos::prelude::*;

#[component]
pub fn TripList() -> impl IntoView {
    view! {
        <EntitySection
            client={EntityClient::<Trip>::from_config()}
            subtitle="Programación de viajes por ruta"
        />
    }
}
