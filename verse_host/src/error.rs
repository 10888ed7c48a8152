//! Error types for the verse host
//!
//! This module defines the error types used throughout the host,
//! including navigation, scene lifecycle, content loading and backend
//! errors.

use std::fmt;

/// Result type for verse host operations
pub type Result<T> = std::result::Result<T, Error>;

/// Verse host errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Slide index outside the registry/content range
    OutOfRange {
        /// Requested index
        index: usize,
        /// Number of registered slides
        len: usize,
    },

    /// Invalid resource (buffer, texture, stage node, descriptor, etc.)
    InvalidResource(String),

    /// Initialization failed (host, renderer, subsystems)
    InitializationFailed(String),

    /// A scene failed to construct, activate or update
    SceneFailed(String),

    /// Backend-specific error (wgpu, etc.)
    BackendError(String),

    /// Verse content file could not be parsed or validated
    ContentError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfRange { index, len } => {
                write!(f, "Slide index {} out of range (0..{})", index, len)
            }
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::SceneFailed(msg) => write!(f, "Scene failed: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::ContentError(msg) => write!(f, "Content error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an [`Error::InvalidResource`] and log it through the host logger.
///
/// # Example
///
/// ```ignore
/// let mesh = maybe_mesh.ok_or_else(|| host_err!("versehost::Stage", "node has no mesh"))?;
/// ```
#[macro_export]
macro_rules! host_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::log::dispatch_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!(),
        );
        $crate::versehost::Error::InvalidResource(message)
    }};
}

/// Return early with a [`host_err!`].
///
/// # Example
///
/// ```ignore
/// if entries.is_empty() {
///     host_bail!("versehost::ContentStore", "content has no entries");
/// }
/// ```
#[macro_export]
macro_rules! host_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::host_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
