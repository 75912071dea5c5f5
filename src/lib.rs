//! hubtrac-i18n
//!
//! Slovak / German / English dictionaries for the HUBTRAC mobile tire service site:
//! locale registry, dictionary resolver and key-path lookup.

pub mod config;
pub mod content;
pub mod diagnostics;
pub mod dictionary;
pub mod locale;
pub mod lookup;
pub mod schema;
pub mod selection;
pub mod types;

pub use dictionary::Dictionaries;
pub use locale::Locale;
pub use lookup::lookup;
pub use selection::LocaleSelection;
