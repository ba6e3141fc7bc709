/// Convenience result type used across maskforge.
pub type MaskforgeResult<T> = Result<T, MaskforgeError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum MaskforgeError {
    /// Invalid run configuration or user-provided parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Problems with discovered foreground or background assets.
    #[error("asset error: {0}")]
    Asset(String),

    /// Crop or placement ranges that cannot be satisfied.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MaskforgeError {
    /// Build a [`MaskforgeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MaskforgeError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`MaskforgeError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
