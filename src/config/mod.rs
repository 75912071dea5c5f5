//! Settings loaded from `.hubtrac-i18n.json`.
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use manager::{
    CONFIG_FILE_NAME,
    ConfigManager,
};
pub use types::{
    ConfigError,
    DiagnosticsConfig,
    I18nSettings,
    SchemaCheckConfig,
    Severity,
    ValidationError,
};
