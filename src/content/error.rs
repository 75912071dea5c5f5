use thiserror::Error;

/// Errors raised while building a content tree from dictionary JSON
#[derive(Error, Debug)]
pub enum ContentError {
    /// The text is not valid JSON
    #[error("Failed to parse dictionary JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document root is not an object
    #[error("Dictionary root must be an object, found {0}")]
    RootNotObject(&'static str),
    /// A value other than string, list of strings, or object
    #[error("Unsupported value at '{path}': expected string, list of strings or object, found {kind}")]
    UnsupportedValue { path: String, kind: &'static str },
}
