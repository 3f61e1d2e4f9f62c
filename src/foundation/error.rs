/// Convenience result type used across orbdraw.
pub type OrbdrawResult<T> = Result<T, OrbdrawError>;

/// Top-level error taxonomy used by the fallible APIs.
///
/// The state machine and the orb sub-animator are total; errors only come from configuration,
/// host collaborators and serialization.
#[derive(thiserror::Error, Debug)]
pub enum OrbdrawError {
    /// Invalid configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A visual sink or scheduler reported a failure.
    #[error("collaborator error: {0}")]
    Collaborator(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OrbdrawError {
    /// Build an [`OrbdrawError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`OrbdrawError::Collaborator`] value.
    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::Collaborator(msg.into())
    }

    /// Build an [`OrbdrawError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
