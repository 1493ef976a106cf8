use crate::shared::api_client::EntityClient;
use crate::shared::section::EntitySection;
use contracts::domain::a004_date_restriction::aggregate::DateRestriction;
use leptos::prelude::*;

#[component]
pub fn DateRestrictionList() -> impl IntoView {
    view! {
        <EntitySection
            client={EntityClient::<DateRestriction>::from_config()}
            title="Fechas restringidas"
            subtitle="Fechas bloqueadas o con disponibilidad parcial por servicio"
        />
    }
}
