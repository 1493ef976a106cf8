use leptos::prelude::*;
use web_sys::window;

/// The seven back-office sections reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Photos,
    Hotels,
    Wholesalers,
    DateRestrictions,
    Routes,
    Services,
    Trips,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Photos,
        Section::Hotels,
        Section::Wholesalers,
        Section::DateRestrictions,
        Section::Routes,
        Section::Services,
        Section::Trips,
    ];

    /// Key used in the URL hash (`#hoteles`).
    pub fn key(&self) -> &'static str {
        match self {
            Section::Photos => "fotos",
            Section::Hotels => "hoteles",
            Section::Wholesalers => "mayoristas",
            Section::DateRestrictions => "fechas",
            Section::Routes => "rutas",
            Section::Services => "servicios",
            Section::Trips => "viajes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Photos => "Fotos",
            Section::Hotels => "Hoteles",
            Section::Wholesalers => "Mayoristas",
            Section::DateRestrictions => "Fechas restringidas",
            Section::Routes => "Rutas",
            Section::Services => "Servicios",
            Section::Trips => "Viajes",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Section::Photos => "image",
            Section::Hotels => "building",
            Section::Wholesalers => "users",
            Section::DateRestrictions => "calendar",
            Section::Routes => "map",
            Section::Services => "briefcase",
            Section::Trips => "truck",
        }
    }

    /// Accepts the key with or without the leading `#`.
    pub fn from_key(key: &str) -> Option<Section> {
        let key = key.trim().trim_start_matches('#');
        Section::ALL.into_iter().find(|s| s.key() == key)
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Section>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    /// Starts on the section named in the URL hash, hotels otherwise.
    pub fn new() -> Self {
        let initial = window()
            .and_then(|w| w.location().hash().ok())
            .and_then(|hash| Section::from_key(&hash))
            .unwrap_or(Section::Hotels);
        Self {
            active: RwSignal::new(initial),
            left_open: RwSignal::new(true),
        }
    }

    pub fn open(&self, section: Section) {
        self.active.set(section);
        if let Some(w) = window() {
            if let Err(e) = w.location().set_hash(section.key()) {
                log::warn!("could not update location hash: {:?}", e);
            }
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_keys_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_key(section.key()), Some(section));
        }
        assert_eq!(Section::from_key("#viajes"), Some(Section::Trips));
        assert_eq!(Section::from_key(""), None);
        assert_eq!(Section::from_key("usuarios"), None);
    }
}
