/// Result alias used across the crate.
pub type MotionResult<T> = Result<T, MotionError>;

/// Construction-time failures. Runtime choreography never fails; it defers or no-ops instead.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// A parameter is out of range (non-finite duration, threshold outside `0..=1`, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// A timeline or tween could not be built.
    #[error("animation error: {0}")]
    Animation(String),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`MotionError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`MotionError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Reject NaN, infinities and values `<= 0`.
pub(crate) fn ensure_positive(name: &str, value: f64) -> MotionResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MotionError::validation(format!(
            "{name} must be finite and > 0 (got {value})"
        )));
    }
    Ok(())
}

/// Reject NaN, infinities and negative values.
pub(crate) fn ensure_non_negative(name: &str, value: f64) -> MotionResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(MotionError::validation(format!(
            "{name} must be finite and >= 0 (got {value})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
