/*! Geometry types for screen coordinates. */

use serde::{Deserialize, Serialize};

/// Rectangle in screen coordinates, edge-based like the Win32 `RECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
  pub left: i32,
  pub top: i32,
  pub right: i32,
  pub bottom: i32,
}

impl Rect {
  /// Width of the rectangle.
  pub const fn width(&self) -> i32 {
    self.right - self.left
  }

  /// Height of the rectangle.
  pub const fn height(&self) -> i32 {
    self.bottom - self.top
  }

  /// Check if a point is contained within the rectangle.
  /// Right and bottom edges are exclusive, matching Win32 semantics.
  pub const fn contains(&self, x: i32, y: i32) -> bool {
    x >= self.left && x < self.right && y >= self.top && y < self.bottom
  }
}
