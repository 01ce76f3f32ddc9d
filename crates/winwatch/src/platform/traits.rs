/*!
Binding traits.

These traits define the contract between core code and the native window
binding. The binding owns window property extraction, coordinate semantics,
and enumeration order; core code treats it as given.
*/

use crate::flags::AncestorFlag;
use crate::types::{Hwnd, MonitorInfo, ProcessId, WinwatchResult};

/// The window-management binding: global lookups plus enumeration.
///
/// `Send + Sync + 'static` because the polling scheduler queries the binding
/// from timer tasks.
pub trait WindowBinding: Send + Sync + 'static {
  /// Capability object for one window.
  type Handle: WindowHandle;

  /// Current foreground window (`GetForegroundWindow`).
  ///
  /// When no window has focus this is still a handle, with a null `Hwnd`.
  fn active_window(&self) -> WinwatchResult<Self::Handle>;

  /// Look up a top-level window by class name (`FindWindowEx`).
  fn window_by_class_name(&self, class_name: &str) -> WinwatchResult<Self::Handle>;

  /// Look up a top-level window by exact title (`FindWindow`).
  fn window_by_title_exact(&self, title: &str) -> WinwatchResult<Self::Handle>;

  /// Visit every top-level window in binding-defined order (typically
  /// front-to-back Z-order), synchronously. Stops early when `visit`
  /// returns `false`.
  fn enumerate_windows(
    &self,
    visit: &mut dyn FnMut(Self::Handle) -> bool,
  ) -> WinwatchResult<()>;
}

/// Per-window operations. Clone is cheap.
///
/// The window behind a handle may be destroyed at any time; every accessor
/// except `hwnd` and `exists` reports that as `WinwatchError::WindowGone`
/// rather than panicking or returning garbage.
pub trait WindowHandle: Clone + Send + Sync + 'static {
  /// The raw handle value. Identity; always available.
  fn hwnd(&self) -> Hwnd;

  /// Whether the window still exists (`IsWindow`).
  fn exists(&self) -> bool;

  /// Whether the window is visible (`IsWindowVisible`).
  fn is_visible(&self) -> WinwatchResult<bool>;

  /// Window title (`GetWindowText`). Empty for title-less windows.
  fn title(&self) -> WinwatchResult<String>;

  /// Window class name (`GetClassName`).
  fn class_name(&self) -> WinwatchResult<String>;

  /// Owning process ID (`GetWindowThreadProcessId`).
  fn pid(&self) -> WinwatchResult<ProcessId>;

  /// Parent window handle (`GetParent`). `None` for top-level windows.
  fn parent(&self) -> WinwatchResult<Option<Hwnd>>;

  /// Ancestor handle per the given flag (`GetAncestor`).
  fn ancestor(&self, flag: AncestorFlag) -> WinwatchResult<Hwnd>;

  /// The monitor hosting this window (`MonitorFromWindow` + `GetMonitorInfo`).
  fn monitor(&self) -> WinwatchResult<MonitorInfo>;

  /// Bring the window to the foreground (`SetForegroundWindow`).
  fn activate(&self) -> WinwatchResult<()>;

  /// Move and resize the window (`SetWindowPos`).
  fn set_window_pos(&self, x: i32, y: i32, width: i32, height: i32) -> WinwatchResult<()>;
}
