/// Convenience result type used across coverkit.
pub type CoverResult<T> = Result<T, CoverError>;

/// Top-level error taxonomy used by editor and rendering APIs.
#[derive(thiserror::Error, Debug)]
pub enum CoverError {
    /// Invalid user-provided data: unknown field keys, routes, or configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// An uploaded file could not be decoded into an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// The composition surface could not be captured to a raster.
    #[error("capture error: {0}")]
    Capture(String),

    /// The captured artifact could not be encoded or saved.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoverError {
    /// Build a [`CoverError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CoverError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CoverError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`CoverError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`CoverError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
