//! Custom error types and result handling for Shiori operations.
//!
//! Parsing and ordering never fail: an unrecognized filename simply yields empty
//! fields. Errors only surface while building a [`ParserConfig`](crate::config::ParserConfig)
//! or parsing an explicit [`NumberRange`](crate::types::NumberRange) from text.

/// Type alias for Results with Shiori errors.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the fallible corners of Shiori.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Regular expression compilation errors
    #[error(transparent)]
    Regex(#[from] regex::Error),
    /// Configuration builder errors (missing or invalid fields)
    #[error(transparent)]
    ParserConfigBuilder(#[from] crate::config::ParserConfigBuilderError),
    /// Text that does not describe a numeric range such as `"16-17"`
    #[error("Invalid number range: '{0}'")]
    InvalidRange(String),
    /// Other errors that don't fit into specific categories
    #[error("Other error: {0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::Other(error)
    }
}

impl From<&str> for Error {
    fn from(error: &str) -> Self {
        Error::Other(error.to_string())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}
