//! Language context for localized fields.

/// Supplies the language codes used to resolve localized fields.
///
/// Localized values are stored as sibling fields suffixed with a language
/// code (`title_en`, `title_de`).
pub trait Localizer {
    /// The language of the current request.
    fn current_lang(&self) -> &str;

    /// The site's configured default language.
    fn default_lang(&self) -> &str;
}

/// A localizer with fixed language codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLocalizer {
    current: String,
    default: String,
}

impl StaticLocalizer {
    /// Creates a localizer.
    pub fn new(current: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            current: current.into(),
            default: default.into(),
        }
    }
}

impl Localizer for StaticLocalizer {
    fn current_lang(&self) -> &str {
        &self.current
    }

    fn default_lang(&self) -> &str {
        &self.default
    }
}

/// Builds the localized field name `name_lang`.
pub(crate) fn localized_key(name: &str, lang: &str) -> String {
    format!("{name}_{lang}")
}
