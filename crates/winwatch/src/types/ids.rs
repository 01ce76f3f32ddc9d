/*! Branded ID types for type-safe entity references. */

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Raw window handle (HWND) value.
///
/// Uniquely names a live OS window for its lifetime. Equality is by value;
/// a handle may go stale at any time (window destroyed), so accessor calls
/// against it are fallible.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
pub struct Hwnd(pub isize);

impl Hwnd {
  /// The null handle, also the `Default`. The foreground query yields this
  /// when no window has focus.
  pub const NULL: Self = Self(0);
}

/// Process ID - branded type to distinguish from other u32 values.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
pub struct ProcessId(pub u32);

/// Identifies one event subscription, returned by `subscribe`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
pub struct ListenerId(pub u64);

/// Global counter for `ListenerId` generation. Starts at 1 (0 could be confused with "null").
static LISTENER_COUNTER: AtomicU64 = AtomicU64::new(1);

impl ListenerId {
  /// Generate a new unique `ListenerId`.
  pub fn new() -> Self {
    Self(LISTENER_COUNTER.fetch_add(1, Ordering::Relaxed))
  }
}

impl Default for ListenerId {
  fn default() -> Self {
    Self::new()
  }
}
