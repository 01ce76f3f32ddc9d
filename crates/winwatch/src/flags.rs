/*!
Named integer constants mirroring Win32 window-state, ancestor, Z-order and
positioning flags.

These are passed through verbatim to the binding's mutators; winwatch never
interprets them. Values come straight from `winuser.h`.
*/

use serde::{Deserialize, Serialize};

/// `SW_*` show states for window placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ShowState {
  /// SW_HIDE
  Hide = 0,
  /// SW_SHOWNORMAL
  ShowNormal = 1,
  /// SW_SHOWMINIMIZED
  ShowMinimized = 2,
  /// SW_SHOWMAXIMIZED (also SW_MAXIMIZE)
  ShowMaximized = 3,
  /// SW_SHOWNOACTIVATE
  ShowNoActivate = 4,
  /// SW_SHOW
  Show = 5,
  /// SW_MINIMIZE
  Minimize = 6,
  /// SW_SHOWMINNOACTIVE
  ShowMinNoActive = 7,
  /// SW_SHOWNA
  ShowNa = 8,
  /// SW_RESTORE
  Restore = 9,
  /// SW_SHOWDEFAULT
  ShowDefault = 10,
  /// SW_FORCEMINIMIZE
  ForceMinimize = 11,
}

impl ShowState {
  /// SW_MAXIMIZE shares the value of SW_SHOWMAXIMIZED.
  pub const MAXIMIZE: Self = Self::ShowMaximized;
}

/// `GA_*` flags for the ancestor query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum AncestorFlag {
  /// GA_PARENT
  Parent = 1,
  /// GA_ROOT
  Root = 2,
  /// GA_ROOTOWNER
  RootOwner = 3,
}

/// Special `HWND_*` values for the insert-after argument of window placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(isize)]
pub enum InsertAfter {
  /// HWND_NOTOPMOST
  NoTopmost = -2,
  /// HWND_TOPMOST
  Topmost = -1,
  /// HWND_TOP
  Top = 0,
  /// HWND_BOTTOM
  Bottom = 1,
}

/// `SWP_*` bit flags for `SetWindowPos`.
///
/// Plain constants rather than an enum because several values alias
/// (FRAMECHANGED/DRAWFRAME, NOREPOSITION/NOOWNERZORDER).
pub mod swp {
  #![allow(missing_docs)]

  pub const NOSIZE: u32 = 0x0001;
  pub const NOMOVE: u32 = 0x0002;
  pub const NOZORDER: u32 = 0x0004;
  pub const NOREDRAW: u32 = 0x0008;
  pub const NOACTIVATE: u32 = 0x0010;
  pub const DRAWFRAME: u32 = 0x0020;
  pub const FRAMECHANGED: u32 = 0x0020;
  pub const SHOWWINDOW: u32 = 0x0040;
  pub const HIDEWINDOW: u32 = 0x0080;
  pub const NOCOPYBITS: u32 = 0x0100;
  pub const NOOWNERZORDER: u32 = 0x0200;
  pub const NOREPOSITION: u32 = 0x0200;
  pub const NOSENDCHANGING: u32 = 0x0400;
  pub const DEFERERASE: u32 = 0x2000;
  pub const ASYNCWINDOWPOS: u32 = 0x4000;
}
