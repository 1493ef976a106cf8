use crate::shared::api_client::EntityClient;
use crate::shared::section::EntitySection;
use contracts::domain::a005_route::aggregate::Route;
use leptos::prelude::*;

#[component]
pub fn RouteList() -> impl IntoView {
    view! {
        <EntitySection
            client={EntityClient::<Route>::from_config()}
            subtitle="Rutas de transporte entre ciudades"
        />
    }
}
