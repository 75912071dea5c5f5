//! Content trees: the translated text of one locale.
mod error;
mod ranges;
mod value;

pub use error::ContentError;
pub use ranges::extract_key_ranges;
pub use value::{
    ContentTree,
    ContentValue,
    ValueKind,
};
