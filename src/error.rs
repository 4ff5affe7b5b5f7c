//! Error taxonomy shared by the navigation core.

use thiserror::Error;

/// Failures surfaced by the core services.
///
/// None of these are fatal to the shell: `NotFound` and `NotPermitted` are
/// rendered as dedicated views, `BackendUnavailable` becomes a transient
/// notification and the programmer errors are logged and ignored.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UiError {
    #[error("no feature matches '{path}'")]
    NotFound { path: String },

    #[error("feature '{path}' is not available with the current permissions")]
    NotPermitted { path: String },

    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("feature path '{0}' is already registered")]
    DuplicateFeature(String),

    #[error("feature path is empty (text: '{0}')")]
    EmptyFeaturePath(String),

    #[error("a snippet generator for format '{0}' is already registered")]
    DuplicateGenerator(String),

    #[error("cannot select at depth {depth} ({selected} selected, {masters} masters)")]
    InvalidDepth {
        depth: usize,
        selected: usize,
        masters: usize,
    },

    #[error("{kind} ({id}) not found")]
    ModelNotFound { kind: String, id: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl UiError {
    pub fn backend(err: &anyhow::Error) -> Self {
        Self::BackendUnavailable(format!("{:#}", err))
    }

    /// Programmer errors are logged and degrade gracefully instead of
    /// failing the current operation.
    pub fn is_programmer_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateFeature(_)
                | Self::EmptyFeaturePath(_)
                | Self::DuplicateGenerator(_)
                | Self::InvalidDepth { .. }
        )
    }
}
