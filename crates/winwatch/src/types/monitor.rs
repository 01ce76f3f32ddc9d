/*! Monitor descriptor returned by window handle queries. */

use super::Rect;
use serde::{Deserialize, Serialize};

/// Read-only description of the monitor hosting a window.
///
/// No lifecycle beyond the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorInfo {
  /// Device name (e.g. `\\.\DISPLAY1`).
  pub name: String,
  /// Whether this is the primary monitor.
  pub primary: bool,
  /// Monitor bounds in virtual-screen coordinates.
  pub bounds: Rect,
}
