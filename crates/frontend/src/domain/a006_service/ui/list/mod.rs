use crate::shared::api_client::EntityClient;
use crate::shared::section::EntitySection;
use contracts::domain::a006_service::aggregate::Service;
use leptos::prelude::*;

#[component]
pub fn ServiceList() -> impl IntoView {
    view! {
        <EntitySection
            client={EntityClient::<Service>::from_config()}
            subtitle="Catálogo de servicios turísticos"
        />
    }
}
