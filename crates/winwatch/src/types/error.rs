/*! Error types for winwatch operations. */

use super::Hwnd;

/// Errors that can occur during winwatch operations.
#[derive(Debug, thiserror::Error)]
pub enum WinwatchError {
  /// The window behind a handle no longer exists. Recoverable: detectors
  /// skip the window, callers retry with a fresh handle.
  #[error("Window {0} no longer exists")]
  WindowGone(Hwnd),

  /// No window title matched the search pattern.
  #[error("No window title matched pattern '{pattern}'")]
  NoMatch { pattern: String },

  /// A literal search string did not compile as a regular expression.
  #[error("Invalid title pattern '{pattern}': {source}")]
  InvalidPattern {
    pattern: String,
    #[source]
    source: regex::Error,
  },

  /// Constructed outside a tokio runtime; the polling scheduler needs one.
  #[error("No tokio runtime available for polling timers")]
  NoRuntime,

  /// Binding-level failure from the OS window API.
  #[error("Platform error: {0}")]
  Platform(String),

  /// Internal error.
  #[error("Internal error: {0}")]
  Internal(String),
}

/// Result type for winwatch operations.
pub type WinwatchResult<T> = Result<T, WinwatchError>;
