//! Locale registry: the closed set of site languages.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The string is not one of the supported locale codes
    #[error("Unsupported locale '{0}'. Expected one of: sk, de, en")]
    InvalidLocale(String),
}

/// A supported site locale.
///
/// Declaration order is display order in language pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Locale {
    /// Slovak (default)
    Sk,
    /// German
    De,
    /// English
    En,
}

impl Locale {
    /// All locales in picker order.
    pub const ALL: [Self; 3] = [Self::Sk, Self::De, Self::En];

    /// The locale served when nothing else matches.
    pub const DEFAULT: Self = Self::Sk;

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Sk => "sk",
            Self::De => "de",
            Self::En => "en",
        }
    }

    /// Native name of the language, as shown in the switcher.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Sk => "Slovenčina",
            Self::De => "Deutsch",
            Self::En => "English",
        }
    }

    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Sk => "🇸🇰",
            Self::De => "🇩🇪",
            Self::En => "🇬🇧",
        }
    }

    /// Parses a candidate locale, degrading to [`Locale::DEFAULT`].
    ///
    /// Returns the locale together with a flag telling whether the fallback was taken.
    #[must_use]
    pub fn parse_or_default(candidate: &str) -> (Self, bool) {
        candidate.parse().map_or((Self::DEFAULT, true), |locale| (locale, false))
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    /// Exact, case-sensitive match on the locale code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.code() == s)
            .ok_or_else(|| LocaleError::InvalidLocale(s.to_string()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Supported locales in display order.
#[must_use]
pub const fn locales() -> [Locale; 3] {
    Locale::ALL
}

#[must_use]
pub const fn default_locale() -> Locale {
    Locale::DEFAULT
}

/// Display name for an untrusted locale string (URL segment, query parameter, ...).
///
/// # Errors
/// [`LocaleError::InvalidLocale`] if `code` is not a supported locale.
pub fn display_name_of(code: &str) -> Result<&'static str, LocaleError> {
    code.parse::<Locale>().map(Locale::display_name)
}
