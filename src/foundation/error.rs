/// Convenience result type used across tilewall.
pub type WallResult<T> = Result<T, WallError>;

/// Top-level error taxonomy used by construction and boundary-parsing APIs.
///
/// The running engine never returns errors: degenerate runtime conditions are
/// reported as [`crate::WallEvent`]s instead.
#[derive(thiserror::Error, Debug)]
pub enum WallError {
    /// Invalid user-provided data (items, viewport, scripts).
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration values outside their allowed range.
    #[error("config error: {0}")]
    Config(String),

    /// Malformed data from the collection source.
    #[error("collection error: {0}")]
    Collection(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WallError {
    /// Build a [`WallError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WallError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`WallError::Collection`] value.
    pub fn collection(msg: impl Into<String>) -> Self {
        Self::Collection(msg.into())
    }

    /// Build a [`WallError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for WallError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
