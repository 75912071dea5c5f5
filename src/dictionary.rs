//! Dictionary resolver: locale to content tree.

use std::fmt;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use thiserror::Error;

use crate::content::{
    ContentError,
    ContentTree,
    ContentValue,
};
use crate::diagnostics::{
    FallbackEvent,
    FallbackObserver,
};
use crate::locale::Locale;
use crate::lookup::{
    KEY_SEPARATOR,
    try_lookup,
};

/// Dictionaries compiled into the binary.
const BUNDLED: [(Locale, &str, &str); 3] = [
    (Locale::Sk, "dictionaries/sk.json", include_str!("../dictionaries/sk.json")),
    (Locale::De, "dictionaries/de.json", include_str!("../dictionaries/de.json")),
    (Locale::En, "dictionaries/en.json", include_str!("../dictionaries/en.json")),
];

#[derive(Error, Debug)]
pub enum DictionaryError {
    /// A dictionary file could not be read
    #[error("Failed to read dictionary file {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    /// A dictionary file is not a valid content tree
    #[error("Invalid dictionary for locale '{locale}' ({origin}): {source}")]
    Content { locale: Locale, origin: String, source: ContentError },
    /// No dictionary was supplied for a supported locale
    #[error("No dictionary supplied for locale '{0}'")]
    MissingLocale(Locale),
    /// Two dictionaries were supplied for the same locale
    #[error("Dictionary for locale '{0}' supplied more than once")]
    DuplicateLocale(Locale),
}

/// Raw dictionary text for one locale, before parsing.
#[derive(Debug, Clone)]
pub struct DictionarySource {
    pub locale: Locale,
    /// Where the text came from, for diagnostics (file path or bundle name)
    pub origin: String,
    pub text: String,
}

impl DictionarySource {
    #[must_use]
    pub fn new(locale: Locale, origin: impl Into<String>, text: impl Into<String>) -> Self {
        Self { locale, origin: origin.into(), text: text.into() }
    }
}

/// A parsed dictionary along with the text it was parsed from.
#[derive(Debug)]
pub struct LocaleDictionary {
    locale: Locale,
    origin: String,
    source: String,
    tree: ContentTree,
}

impl LocaleDictionary {
    fn parse(source: DictionarySource) -> Result<Self, DictionaryError> {
        let DictionarySource { locale, origin, text } = source;
        let tree = ContentTree::from_json_str(&text).map_err(|source| {
            DictionaryError::Content { locale, origin: origin.clone(), source }
        })?;
        tracing::debug!(%locale, %origin, sections = tree.len(), "Loaded dictionary");
        Ok(Self { locale, origin, source: text, tree })
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The JSON text the tree was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub const fn tree(&self) -> &ContentTree {
        &self.tree
    }
}

/// The content trees of every supported locale.
///
/// Built once at startup and only read afterwards. Resolution never fails:
/// unsupported locales get the default locale's tree and unresolved key paths
/// come back unchanged. An optional [`FallbackObserver`] is told about both.
pub struct Dictionaries {
    sk: LocaleDictionary,
    de: LocaleDictionary,
    en: LocaleDictionary,
    /// Separator for key-path lookups
    key_separator: String,
    observer: Option<Arc<dyn FallbackObserver>>,
}

impl fmt::Debug for Dictionaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionaries")
            .field("sk", &self.sk.origin)
            .field("de", &self.de.origin)
            .field("en", &self.en.origin)
            .field("key_separator", &self.key_separator)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Dictionaries {
    /// Parses the dictionaries compiled into the crate.
    ///
    /// # Errors
    /// Returns error if a bundled dictionary is not a valid content tree.
    pub fn bundled() -> Result<Self, DictionaryError> {
        Self::from_sources(
            BUNDLED
                .into_iter()
                .map(|(locale, origin, text)| DictionarySource::new(locale, origin, text)),
        )
    }

    /// Reads `<dir>/<code>.json` for every supported locale.
    ///
    /// # Errors
    /// Returns error if a file cannot be read or is not a valid content tree.
    pub fn load_from_dir(dir: &Path) -> Result<Self, DictionaryError> {
        tracing::debug!(dir = %dir.display(), "Loading dictionaries from directory");

        let sources = Locale::ALL
            .into_iter()
            .map(|locale| {
                let path = dir.join(format!("{}.json", locale.code()));
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| DictionaryError::Io { path: path.clone(), source })?;
                Ok(DictionarySource::new(locale, path.display().to_string(), text))
            })
            .collect::<Result<Vec<_>, DictionaryError>>()?;

        Self::from_sources(sources)
    }

    /// Builds the dictionaries from raw sources, one per supported locale.
    ///
    /// # Errors
    /// Returns error if a locale is missing or duplicated, or a source is not
    /// a valid content tree.
    pub fn from_sources(
        sources: impl IntoIterator<Item = DictionarySource>,
    ) -> Result<Self, DictionaryError> {
        let (mut sk, mut de, mut en) = (None, None, None);

        for source in sources {
            let slot = match source.locale {
                Locale::Sk => &mut sk,
                Locale::De => &mut de,
                Locale::En => &mut en,
            };
            if slot.is_some() {
                return Err(DictionaryError::DuplicateLocale(source.locale));
            }
            *slot = Some(LocaleDictionary::parse(source)?);
        }

        Ok(Self {
            sk: sk.ok_or(DictionaryError::MissingLocale(Locale::Sk))?,
            de: de.ok_or(DictionaryError::MissingLocale(Locale::De))?,
            en: en.ok_or(DictionaryError::MissingLocale(Locale::En))?,
            key_separator: KEY_SEPARATOR.to_string(),
            observer: None,
        })
    }

    /// Attaches an observer for fallback events.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn FallbackObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Sets the separator used by [`Dictionaries::lookup`].
    #[must_use]
    pub fn with_key_separator(mut self, separator: impl Into<String>) -> Self {
        self.key_separator = separator.into();
        self
    }

    #[must_use]
    pub fn key_separator(&self) -> &str {
        &self.key_separator
    }

    #[must_use]
    pub const fn dictionary(&self, locale: Locale) -> &LocaleDictionary {
        match locale {
            Locale::Sk => &self.sk,
            Locale::De => &self.de,
            Locale::En => &self.en,
        }
    }

    /// Dictionaries in picker order.
    pub fn iter(&self) -> impl Iterator<Item = &LocaleDictionary> {
        Locale::ALL.into_iter().map(|locale| self.dictionary(locale))
    }

    /// Content tree of a known locale.
    #[must_use]
    pub const fn get(&self, locale: Locale) -> &ContentTree {
        self.dictionary(locale).tree()
    }

    /// Content tree for a candidate locale string.
    ///
    /// Unsupported or malformed candidates get the default locale's tree.
    #[must_use]
    pub fn resolve(&self, candidate: &str) -> &ContentTree {
        self.get(self.resolve_locale(candidate))
    }

    /// The locale that [`Dictionaries::resolve`] would serve for `candidate`.
    #[must_use]
    pub fn resolve_locale(&self, candidate: &str) -> Locale {
        let (locale, fell_back) = Locale::parse_or_default(candidate);
        if fell_back {
            self.notify(&FallbackEvent::UnknownLocale {
                requested: candidate.to_string(),
                fallback: locale,
            });
        }
        locale
    }

    /// Resolves `candidate`, then looks up `path` in its tree.
    ///
    /// Returns `path` unchanged when it does not lead to a string.
    #[must_use]
    pub fn lookup<'a>(&'a self, candidate: &str, path: &'a str) -> &'a str {
        self.lookup_in(self.resolve_locale(candidate), path)
    }

    /// Looks up `path` in the tree of a known locale.
    #[must_use]
    pub fn lookup_in<'a>(&'a self, locale: Locale, path: &'a str) -> &'a str {
        if let Some(text) =
            try_lookup(self.get(locale), path, &self.key_separator).and_then(ContentValue::as_leaf)
        {
            return text;
        }
        self.notify(&FallbackEvent::MissingKey { locale, path: path.to_string() });
        path
    }

    fn notify(&self, event: &FallbackEvent) {
        if let Some(observer) = &self.observer {
            observer.on_fallback(event);
        }
    }
}
