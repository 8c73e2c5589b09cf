//! Error types for the cvparse library.

use thiserror::Error;

/// Result type alias for cvparse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing a CV document.
#[derive(Error, Debug)]
pub enum Error {
    /// The document could not be parsed into a tree. In practice this
    /// surfaces a malformed metadata block; markdown parsing itself is total.
    #[error("Document parsing error: {0}")]
    DocumentParse(String),

    /// A required frontmatter field is absent or empty.
    #[error("Frontmatter is missing required field: {0}")]
    FrontmatterMissingField(String),

    /// A frontmatter field is present but fails its format check.
    #[error("Frontmatter field `{field}` has invalid value: {value}")]
    FrontmatterInvalidField { field: String, value: String },

    /// Error while producing rendered markup.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::DocumentParse(format!("invalid metadata block: {err}"))
    }
}
