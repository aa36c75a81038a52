//! Error types for rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or running a layout engine.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No layout engine installation could be located.
    #[error("{0}")]
    InstallationNotFound(String),

    /// The installation was found but has no executable for the algorithm.
    #[error("{0}")]
    AlgorithmNotFound(String),

    /// The engine exited unsuccessfully. Carries its diagnostics, annotated
    /// with the offending input lines where they could be identified.
    #[error("{0}")]
    Rendering(String),

    /// The render request itself is malformed.
    #[error("{0}")]
    Validation(String),

    #[error("failed to run {}: {source}", .program.display())]
    Io {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] gvstyle_core::Error),
}

impl RenderError {
    pub(crate) fn io(program: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let program = program.into();
        move |source| RenderError::Io { program, source }
    }
}
