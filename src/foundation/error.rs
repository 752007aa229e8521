/// Convenience result type used across sapling.
pub type SaplingResult<T> = Result<T, SaplingError>;

/// Top-level error taxonomy used by the scene, timeline and render APIs.
#[derive(thiserror::Error, Debug)]
pub enum SaplingError {
    /// Invalid user-provided scene, timeline or component data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while scheduling or sampling tweens.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while evaluating scene state for a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// A key or handle that the caller expected to exist was not found.
    #[error("lookup error: {0}")]
    Lookup(String),

    /// Errors raised by the rasterizer or image output.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing scene files.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SaplingError {
    /// Build a [`SaplingError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SaplingError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`SaplingError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`SaplingError::Lookup`] value.
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Build a [`SaplingError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SaplingError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
