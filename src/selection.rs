//! The locale a page is currently rendered in.

use crate::content::ContentTree;
use crate::dictionary::Dictionaries;
use crate::locale::Locale;

/// Transient "selected locale" state of a page.
///
/// Starts at the default locale when the page mounts and changes on language
/// switcher input. The dictionaries are borrowed, never copied.
#[derive(Debug, Clone, Copy)]
pub struct LocaleSelection<'d> {
    dictionaries: &'d Dictionaries,
    current: Locale,
}

impl<'d> LocaleSelection<'d> {
    #[must_use]
    pub const fn new(dictionaries: &'d Dictionaries) -> Self {
        Self { dictionaries, current: Locale::DEFAULT }
    }

    /// Switches to `candidate`, or to the default locale if it is not supported.
    ///
    /// Returns the locale now selected.
    pub fn select(&mut self, candidate: &str) -> Locale {
        self.current = self.dictionaries.resolve_locale(candidate);
        self.current
    }

    #[must_use]
    pub const fn current(&self) -> Locale {
        self.current
    }

    /// Content tree of the selected locale.
    #[must_use]
    pub const fn dictionary(&self) -> &'d ContentTree {
        self.dictionaries.get(self.current)
    }

    /// Key-path lookup in the selected locale.
    #[must_use]
    pub fn t<'a>(&self, path: &'a str) -> &'a str
    where
        'd: 'a,
    {
        self.dictionaries.lookup_in(self.current, path)
    }
}
