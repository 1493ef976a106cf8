use crate::shared::api_client::EntityClient;
use crate::shared::section::EntitySection;
use contracts::domain::a001_photo::aggregate::Photo;
use leptos::prelude::*;

#[component]
pub fn PhotoList() -> impl IntoView {
    view! {
        <EntitySection
            client={EntityClient::<Photo>::from_config()}
            subtitle="Galería de imágenes asociadas a los servicios"
        />
    }
}
