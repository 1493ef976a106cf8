use crate::shared::api_client::EntityClient;
use crate::shared::section::EntitySection;
use contracts::domain::a003_wholesaler::aggregate::Wholesaler;
use leptos::prelude::*;

#[component]
pub fn WholesalerList() -> impl IntoView {
    view! {
        <EntitySection
            client={EntityClient::<Wholesaler>::from_config()}
            subtitle="Mayoristas y comisiones pactadas"
        />
    }
}
