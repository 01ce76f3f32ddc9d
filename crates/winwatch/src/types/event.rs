/*! Event kinds and payloads for window change notifications. */

use serde::{Deserialize, Serialize};

/// The closed set of subscribable event kinds.
///
/// `CloseWindow` is declared in the vocabulary and served by the window-list
/// loop, but no detector currently publishes it (the known-window set is
/// append-only, so removals are never observed). Subscribing to it still
/// activates the shared loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
  /// Foreground window changed.
  ActiveWindow,
  /// A new visible, titled window appeared.
  OpenWindow,
  /// Declared but never emitted.
  CloseWindow,
}

/// A published change notification, carrying the affected window handles.
///
/// Generic over the binding's handle type so listeners can query the window
/// directly from the payload.
#[derive(Debug, Clone)]
pub enum WindowEvent<H> {
  /// Foreground focus moved from `previous` to `current`.
  ActiveWindowChanged { current: H, previous: H },
  /// `window` was seen for the first time since the baseline pass.
  WindowOpened { window: H },
  /// Reserved; never constructed by the detectors.
  WindowClosed { window: H },
}

impl<H> WindowEvent<H> {
  /// The event kind this payload is delivered under.
  pub const fn kind(&self) -> EventKind {
    match self {
      WindowEvent::ActiveWindowChanged { .. } => EventKind::ActiveWindow,
      WindowEvent::WindowOpened { .. } => EventKind::OpenWindow,
      WindowEvent::WindowClosed { .. } => EventKind::CloseWindow,
    }
  }
}
