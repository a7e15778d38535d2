//! Error types for the Kindle engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and simulation execution.

/// Top-level error for the Kindle engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: kindle_core::config::ConfigError,
    },

    /// The simulation could not be built from configuration.
    #[error("setup error: {source}")]
    Setup {
        /// The underlying setup error.
        #[from]
        source: kindle_core::tick::SetupError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: kindle_core::runner::RunnerError,
    },
}
