//! Error types for the window manager
//!
//! Window operations never fail: unknown ids are silent no-ops. Errors only
//! come from parsing host-supplied JSON and from the browser host itself.

use thiserror::Error;

/// Errors that can occur while configuring or driving the desktop
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FolioError {
    /// Portfolio content JSON could not be parsed
    #[error("invalid portfolio content: {0}")]
    Content(String),

    /// Desktop configuration JSON could not be parsed
    #[error("invalid desktop config: {0}")]
    Config(String),

    /// No project with the given id exists in the catalog
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    /// A browser object the host needs is missing
    #[error("host unavailable: {0}")]
    HostUnavailable(&'static str),

    /// A browser call made by the host failed
    #[error("host call '{op}' failed: {reason}")]
    Host {
        /// The call that was attempted
        op: &'static str,
        /// Message reported by the browser
        reason: String,
    },
}

/// Result type alias for fallible desktop operations
pub type FolioResult<T> = Result<T, FolioError>;
