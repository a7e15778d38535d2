//! Error types for the `kindle-fire` crate.
//!
//! All fallible operations in this crate return [`FireError`].

/// Errors that can occur while configuring or stepping a fire.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FireError {
    /// The fire's configuration is unusable. Fatal at setup.
    #[error("invalid fire configuration: {reason}")]
    InvalidConfiguration {
        /// Explanation naming the missing or bad piece.
        reason: String,
    },

    /// A mutating call received a bad argument. State is left unchanged.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Explanation of what is wrong with the argument.
        reason: String,
    },
}

/// Reject negative or non-finite seconds passed to a mutating call.
pub(crate) fn check_seconds(value: f32, what: &str) -> Result<f32, FireError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(FireError::InvalidArgument {
            reason: format!("{what} must be a non-negative number of seconds, got {value}"),
        })
    }
}
