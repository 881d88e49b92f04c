use std::time::Duration;

use ayah_core::types::{AuthorId, DEFAULT_AUTHOR_ID};

/// Quiet period after the last search keystroke before fetching.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Display locale. Affects surah names and date formatting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Tr,
}

impl Locale {
    /// Parse a locale tag (`en`, `tr`, `tr-TR`, ...), falling back to English.
    pub fn parse(tag: &str) -> Self {
        let primary = tag.trim().split(|c: char| c == '-' || c == '_').next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("tr") {
            Locale::Tr
        } else {
            Locale::En
        }
    }
}

/// Panel configuration.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Author whose translation is shown with each verse.
    pub author_id: AuthorId,
    pub locale: Locale,
    pub search_debounce: Duration,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            author_id: DEFAULT_AUTHOR_ID,
            locale: Locale::default(),
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}
