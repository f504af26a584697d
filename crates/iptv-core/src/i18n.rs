//! UI strings in English and Spanish.
//!
//! Lookup never fails: an unknown language falls back to English, an unknown
//! key to the key itself.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "es" => Language::Es,
            _ => Language::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }

    /// The other supported language; settings cycles between the two.
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Es,
            Language::Es => Language::En,
        }
    }
}

const EN: &[(&str, &str)] = &[
    ("disclaimerTitle", "Legal Disclaimer"),
    (
        "disclaimerText",
        "This application does not provide or endorse any IPTV lists. Users are responsible \
         for the legality of their content sources. The developers assume no liability for \
         user-provided content.\n\nBy continuing, you accept these terms.",
    ),
    ("accept", "Accept"),
    ("exit", "Exit"),
    ("setupTitle", "Add Your IPTV List"),
    ("labelUrl", "M3U Playlist URL"),
    ("labelName", "List Name (optional)"),
    ("urlPlaceholder", "http://example.com/playlist.m3u"),
    ("namePlaceholder", "My List"),
    ("save", "Save"),
    ("cancel", "Cancel"),
    ("loading", "Loading..."),
    ("loadingChannels", "Loading channels..."),
    ("favorites", "Favorites"),
    ("settings", "Settings"),
    ("back", "Back"),
    ("settingsTitle", "Settings"),
    ("language", "Language / Idioma"),
    ("listManagement", "List Management"),
    ("about", "About"),
    ("legalDisclaimer", "Legal Disclaimer"),
    ("myFavorites", "MY FAVORITES"),
    ("addedToFavorites", "Added to Favorites"),
    ("removedFromFavorites", "Removed from Favorites"),
    ("addToFavorites", "Add to Favorites"),
    ("removeFromFavorites", "Remove from Favorites"),
    ("errorLoadingPlaylist", "Error loading playlist"),
    ("invalidUrl", "Invalid URL"),
    ("channelNotAvailable", "Channel not available"),
    ("noChannels", "No channels"),
    ("noFavorites", "No favorites"),
    ("selectGroup", "Select a group"),
    ("selectPlaylist", "Select a playlist"),
    ("addPlaylist", "Add playlist"),
    ("groups", "Groups"),
    ("channels", "Channels"),
    ("nowPlaying", "Now playing"),
];

const ES: &[(&str, &str)] = &[
    ("disclaimerTitle", "Aviso Legal"),
    (
        "disclaimerText",
        "Esta aplicación no proporciona ni respalda ninguna lista IPTV. Los usuarios son \
         responsables de la legalidad de sus fuentes de contenido. Los desarrolladores no \
         asumen ninguna responsabilidad por el contenido proporcionado por el usuario.\n\n\
         Al continuar, acepta estos términos.",
    ),
    ("accept", "Aceptar"),
    ("exit", "Salir"),
    ("setupTitle", "Agregar tu Lista IPTV"),
    ("labelUrl", "URL de la Lista M3U"),
    ("labelName", "Nombre de la Lista (opcional)"),
    ("urlPlaceholder", "http://ejemplo.com/playlist.m3u"),
    ("namePlaceholder", "Mi Lista"),
    ("save", "Guardar"),
    ("cancel", "Cancelar"),
    ("loading", "Cargando..."),
    ("loadingChannels", "Cargando canales..."),
    ("favorites", "Favoritos"),
    ("settings", "Ajustes"),
    ("back", "Volver"),
    ("settingsTitle", "Ajustes"),
    ("language", "Idioma / Language"),
    ("listManagement", "Gestión de Listas"),
    ("about", "Acerca de"),
    ("legalDisclaimer", "Aviso Legal"),
    ("myFavorites", "MIS FAVORITOS"),
    ("addedToFavorites", "Agregado a Favoritos"),
    ("removedFromFavorites", "Eliminado de Favoritos"),
    ("addToFavorites", "Agregar a Favoritos"),
    ("removeFromFavorites", "Quitar de Favoritos"),
    ("errorLoadingPlaylist", "Error al cargar la lista"),
    ("invalidUrl", "URL inválida"),
    ("channelNotAvailable", "Canal no disponible"),
    ("noChannels", "No hay canales"),
    ("noFavorites", "No hay favoritos"),
    ("selectGroup", "Selecciona un grupo"),
    ("selectPlaylist", "Selecciona una lista"),
    ("addPlaylist", "Agregar lista"),
    ("groups", "Grupos"),
    ("channels", "Canales"),
    ("nowPlaying", "Reproduciendo"),
];

fn table(language: Language) -> &'static [(&'static str, &'static str)] {
    match language {
        Language::En => EN,
        Language::Es => ES,
    }
}

/// Text for `key` in `language`, or `key` itself when there is none.
pub fn translate(language: &str, key: &str) -> String {
    lookup(Language::from_code(language), key)
        .unwrap_or(key)
        .to_string()
}

pub fn lookup(language: Language, key: &str) -> Option<&'static str> {
    table(language)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_both_languages() {
        assert_eq!(translate("en", "addedToFavorites"), "Added to Favorites");
        assert_eq!(translate("es", "addedToFavorites"), "Agregado a Favoritos");
        assert_eq!(translate("ES", "invalidUrl"), "URL inválida");
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(translate("en", "noSuchKey"), "noSuchKey");
        assert_eq!(translate("fr", "errorLoadingPlaylist"), "Error loading playlist");
    }

    #[test]
    fn test_tables_have_same_keys() {
        let mut en: Vec<&str> = EN.iter().map(|(k, _)| *k).collect();
        let mut es: Vec<&str> = ES.iter().map(|(k, _)| *k).collect();
        en.sort_unstable();
        es.sort_unstable();
        assert_eq!(en, es);
    }

    #[test]
    fn test_language_toggle() {
        assert_eq!(Language::from_code("en").toggled().code(), "es");
        assert_eq!(Language::Es.toggled(), Language::En);
    }
}
