/// Convenience result type used across pocketpals.
pub type PocketResult<T> = Result<T, PocketError>;

/// Top-level error taxonomy used by the drivers.
///
/// The core algorithms (segmentation, reveal sequencing, track advancing) are total and never
/// produce one of these; only the host-facing glue does.
#[derive(thiserror::Error, Debug)]
pub enum PocketError {
    /// Invalid user-provided arguments or values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing or malformed input data (records, catalogs, state files).
    #[error("data error: {0}")]
    Data(String),

    /// A named layer, asset slot or source folder the document expects is missing.
    #[error("template error: {0}")]
    Template(String),

    /// Errors while rasterizing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while encoding video output.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PocketError {
    /// Build a [`PocketError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PocketError::Data`] value.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Build a [`PocketError::Template`] value.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Build a [`PocketError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PocketError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
