use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "schemaCheck.severity")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    pub key_separator: String,

    /// Directory holding `sk.json`, `de.json` and `en.json`.
    /// If unset, the dictionaries compiled into the binary are used.
    pub dictionary_dir: Option<String>,

    pub diagnostics: DiagnosticsConfig,
    pub schema_check: SchemaCheckConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagnosticsConfig {
    /// Log locale and key fallbacks through `tracing`.
    pub log_fallbacks: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { log_fallbacks: true }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaCheckConfig {
    /// Report empty or whitespace-only strings as issues.
    pub report_empty_values: bool,
    /// Whether issues fail the check.
    pub severity: Severity,
}

impl Default for SchemaCheckConfig {
    fn default() -> Self {
        Self { report_empty_values: true, severity: Severity::Error }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl I18nSettings {
    /// # Errors
    /// - Invalid separator
    /// - Empty dictionary directory
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if let Some(dir) = &self.dictionary_dir
            && dir.trim().is_empty()
        {
            errors.push(ValidationError::new(
                "dictionaryDir",
                "The directory cannot be empty. Please specify a path (e.g., \"dictionaries\"), or remove this field",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            key_separator: ".".to_string(),
            dictionary_dir: None,
            diagnostics: DiagnosticsConfig::default(),
            schema_check: SchemaCheckConfig::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = I18nSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"dictionaryDir": "public/dictionaries", "schemaCheck": {"severity": "warning"}}"#;

        let settings: I18nSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.key_separator, eq("."));
        assert_that!(settings.dictionary_dir, some(eq("public/dictionaries")));
        assert_that!(settings.schema_check.severity, eq(Severity::Warning));
        assert_that!(settings.schema_check.report_empty_values, eq(true));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: I18nSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings, I18nSettings::default());
        assert_that!(settings.diagnostics.log_fallbacks, eq(true));
        assert_that!(settings.schema_check.severity, eq(Severity::Error));
    }

    #[rstest]
    fn deserialize_rejects_unknown_severity() {
        let json = r#"{"schemaCheck": {"severity": "fatal"}}"#;

        let result = serde_json::from_str::<I18nSettings>(json);

        assert!(result.is_err());
    }

    #[rstest]
    fn validate_invalid_key_separator_empty() {
        let settings = I18nSettings { key_separator: String::new(), ..I18nSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("keySeparator")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_dictionary_dir_blank() {
        let settings =
            I18nSettings { dictionary_dir: Some("  ".to_string()), ..I18nSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("dictionaryDir")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = I18nSettings {
            key_separator: String::new(),
            dictionary_dir: Some(String::new()),
            ..I18nSettings::default()
        };

        let validation_result = settings.validate();
        let errors = validation_result.unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. keySeparator"));
        assert_that!(error_message, contains_substring("2. dictionaryDir"));
        assert_that!(error_message, contains_substring("cannot be empty"));
    }
}
