/// Convenience result type used across Vexel.
pub type VexelResult<T> = Result<T, VexelError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Frame-loop entry points (layout, paint, attach, detach, hit tests) never
/// fail; a leaf that cannot contribute draws nothing. These errors surface
/// only at the boundaries: construction, decoding, property dispatch.
#[derive(thiserror::Error, Debug)]
pub enum VexelError {
    /// Invalid caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while decoding or resolving backing images.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors while preparing renderer-side resources.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VexelError {
    /// Build a [`VexelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VexelError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`VexelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
