//! Theme and locale preferences.
//!
//! Both values are read once from the [`PreferenceStore`] at startup and
//! written back on every change. Storage problems never block the page:
//! a missing or unreadable value falls back to the default.

use folio_platform::PreferenceStore;
use folio_types::Language;
use folio_types::error::Result;

/// Store key for the theme flag. The value is JSON boolean text.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Store key for the language code.
pub const LANGUAGE_KEY: &str = "language";

/// Colour scheme applied to the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub const fn from_dark_mode(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Class to put on the root element, if any.
    pub const fn root_class(self) -> Option<&'static str> {
        match self {
            Self::Dark => Some("dark"),
            Self::Light => None,
        }
    }
}

/// User-selected theme and language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    dark_mode: bool,
    language: Language,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            language: Language::En,
        }
    }
}

impl Preferences {
    /// Read both preferences, substituting defaults for anything missing
    /// or unparseable.
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        let defaults = Self::default();

        let dark_mode = match read(store, DARK_MODE_KEY) {
            Some(raw) => serde_json::from_str::<bool>(&raw).unwrap_or_else(|e| {
                log::warn!("Ignoring stored {DARK_MODE_KEY}={raw:?}: {e}");
                defaults.dark_mode
            }),
            None => defaults.dark_mode,
        };

        let language = match read(store, LANGUAGE_KEY) {
            Some(raw) => Language::from_code(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring stored {LANGUAGE_KEY}={raw:?}: unknown language");
                defaults.language
            }),
            None => defaults.language,
        };

        log::debug!("Preferences loaded: dark_mode={dark_mode}, language={language}");
        Self {
            dark_mode,
            language,
        }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn theme(&self) -> Theme {
        Theme::from_dark_mode(self.dark_mode)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Set the theme flag. Writes to the store only when the value changes.
    ///
    /// The in-memory value is updated even if the write fails, so the page
    /// keeps reflecting the user's choice for this session.
    pub fn set_dark_mode<S: PreferenceStore + ?Sized>(
        &mut self,
        dark: bool,
        store: &mut S,
    ) -> Result<bool> {
        if self.dark_mode == dark {
            return Ok(false);
        }
        self.dark_mode = dark;
        log::info!("Theme -> {}", if dark { "dark" } else { "light" });
        store.set(DARK_MODE_KEY, if dark { "true" } else { "false" })?;
        Ok(true)
    }

    pub fn toggle_dark_mode<S: PreferenceStore + ?Sized>(&mut self, store: &mut S) -> Result<bool> {
        self.set_dark_mode(!self.dark_mode, store)
    }

    /// Set the language. Writes to the store only when the value changes.
    pub fn set_language<S: PreferenceStore + ?Sized>(
        &mut self,
        language: Language,
        store: &mut S,
    ) -> Result<bool> {
        if self.language == language {
            return Ok(false);
        }
        self.language = language;
        log::info!("Language -> {language}");
        store.set(LANGUAGE_KEY, language.code())?;
        Ok(true)
    }

    pub fn toggle_language<S: PreferenceStore + ?Sized>(&mut self, store: &mut S) -> Result<bool> {
        self.set_language(self.language.toggled(), store)
    }
}

/// Read a key, treating store errors like an absent value.
fn read<S: PreferenceStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Preference store read of {key} failed: {e}");
            None
        },
    }
}
