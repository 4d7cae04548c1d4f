//! Error types for texproject operations.
//!
//! This module defines [`TexprojectError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `TexprojectError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `TexprojectError::Other`) for unexpected errors
//! - Failures of individual pipeline closures are not errors: they are recorded
//!   in the run report (see [`crate::control::RunReport`])

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for texproject operations.
#[derive(Debug, Error)]
pub enum TexprojectError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration or template file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The working directory is not a texproject project.
    #[error("No texproject project found in '{path}'. Run 'tpr init TEMPLATE' first.")]
    ProjectNotFound { path: PathBuf },

    /// The working directory already contains a project.
    #[error("A texproject project already exists in '{path}'")]
    ProjectExists { path: PathBuf },

    /// A named resource is not installed in the resource library.
    #[error("Unknown {kind} '{name}'. Available: {available}")]
    UnknownResource {
        kind: String,
        name: String,
        available: String,
    },

    /// A project template is missing or incomplete.
    #[error("Template '{name}' not found in '{path}'")]
    TemplateMissing { name: String, path: PathBuf },

    /// Invalid command-line input detected before a pipeline is built.
    #[error("{message}")]
    InvalidArgument { message: String },

    /// An external command could not be started.
    #[error("could not find command '{command}'")]
    CommandNotFound { command: String },

    /// Template rendering failed.
    #[error("Failed to render '{name}': {message}")]
    RenderError { name: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TexprojectError {
    /// Errors caused by how the command was invoked rather than by the system.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::ProjectNotFound { .. }
                | Self::ProjectExists { .. }
                | Self::UnknownResource { .. }
                | Self::TemplateMissing { .. }
                | Self::InvalidArgument { .. }
        )
    }
}

/// Result type alias for texproject operations.
pub type Result<T> = std::result::Result<T, TexprojectError>;
