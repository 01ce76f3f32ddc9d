/*!
Scriptable in-memory binding for tests.

Backs every handle with a shared window table; removing a window from the
table makes outstanding handles stale, which is how `WindowGone` paths are
exercised.
*/

use crate::flags::AncestorFlag;
use crate::platform::{WindowBinding, WindowHandle};
use crate::types::{Hwnd, MonitorInfo, ProcessId, Rect, WinwatchError, WinwatchResult};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct FakeWindow {
  hwnd: Hwnd,
  title: String,
  class_name: String,
  pid: ProcessId,
  visible: bool,
}

#[derive(Debug, Default)]
struct FakeState {
  windows: Mutex<Vec<FakeWindow>>,
  foreground: Mutex<Hwnd>,
  visited: AtomicUsize,
  fail_active_query: AtomicBool,
}

/// Test double for the Win32 binding. Clone shares the window table.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeBinding {
  state: Arc<FakeState>,
}

impl FakeBinding {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  /// Add a window to the table. Enumeration visits in insertion order.
  pub(crate) fn add_window(&self, hwnd: isize, title: &str, visible: bool) {
    self.state.windows.lock().push(FakeWindow {
      hwnd: Hwnd(hwnd),
      title: title.to_owned(),
      class_name: format!("FakeClass{title}"),
      pid: ProcessId(4242),
      visible,
    });
  }

  /// Retitle a window. An empty title makes it title-less.
  pub(crate) fn set_title(&self, hwnd: isize, title: &str) {
    let hwnd = Hwnd(hwnd);
    if let Some(win) = self.state.windows.lock().iter_mut().find(|w| w.hwnd == hwnd) {
      win.title = title.to_owned();
    }
  }

  /// Remove a window; outstanding handles for it become stale.
  pub(crate) fn close_window(&self, hwnd: isize) {
    let hwnd = Hwnd(hwnd);
    self.state.windows.lock().retain(|w| w.hwnd != hwnd);
  }

  pub(crate) fn set_foreground(&self, hwnd: isize) {
    *self.state.foreground.lock() = Hwnd(hwnd);
  }

  /// Make the next foreground queries fail at the binding level.
  pub(crate) fn fail_active_query(&self, fail: bool) {
    self.state.fail_active_query.store(fail, Ordering::SeqCst);
  }

  /// Total windows visited across all enumerations, for short-circuit checks.
  pub(crate) fn visited(&self) -> usize {
    self.state.visited.load(Ordering::SeqCst)
  }

  pub(crate) fn handle(&self, hwnd: isize) -> FakeHandle {
    FakeHandle {
      hwnd: Hwnd(hwnd),
      state: Arc::clone(&self.state),
    }
  }
}

/// Handle into the fake window table.
#[derive(Debug, Clone)]
pub(crate) struct FakeHandle {
  hwnd: Hwnd,
  state: Arc<FakeState>,
}

impl FakeHandle {
  fn lookup(&self) -> WinwatchResult<FakeWindow> {
    self
      .state
      .windows
      .lock()
      .iter()
      .find(|w| w.hwnd == self.hwnd)
      .cloned()
      .ok_or(WinwatchError::WindowGone(self.hwnd))
  }
}

impl WindowBinding for FakeBinding {
  type Handle = FakeHandle;

  fn active_window(&self) -> WinwatchResult<Self::Handle> {
    if self.state.fail_active_query.load(Ordering::SeqCst) {
      return Err(WinwatchError::Platform("foreground query failed".into()));
    }
    Ok(self.handle(self.state.foreground.lock().0))
  }

  fn window_by_class_name(&self, class_name: &str) -> WinwatchResult<Self::Handle> {
    let windows = self.state.windows.lock();
    windows
      .iter()
      .find(|w| w.class_name == class_name)
      .map(|w| FakeHandle {
        hwnd: w.hwnd,
        state: Arc::clone(&self.state),
      })
      .ok_or_else(|| WinwatchError::Platform(format!("no window with class {class_name}")))
  }

  fn window_by_title_exact(&self, title: &str) -> WinwatchResult<Self::Handle> {
    let windows = self.state.windows.lock();
    windows
      .iter()
      .find(|w| w.title == title)
      .map(|w| FakeHandle {
        hwnd: w.hwnd,
        state: Arc::clone(&self.state),
      })
      .ok_or_else(|| WinwatchError::Platform(format!("no window titled {title}")))
  }

  fn enumerate_windows(
    &self,
    visit: &mut dyn FnMut(Self::Handle) -> bool,
  ) -> WinwatchResult<()> {
    // Snapshot so visit callbacks may mutate the table.
    let snapshot: Vec<Hwnd> = self.state.windows.lock().iter().map(|w| w.hwnd).collect();
    for hwnd in snapshot {
      self.state.visited.fetch_add(1, Ordering::SeqCst);
      if !visit(self.handle(hwnd.0)) {
        break;
      }
    }
    Ok(())
  }
}

impl WindowHandle for FakeHandle {
  fn hwnd(&self) -> Hwnd {
    self.hwnd
  }

  fn exists(&self) -> bool {
    self.lookup().is_ok()
  }

  fn is_visible(&self) -> WinwatchResult<bool> {
    Ok(self.lookup()?.visible)
  }

  fn title(&self) -> WinwatchResult<String> {
    Ok(self.lookup()?.title)
  }

  fn class_name(&self) -> WinwatchResult<String> {
    Ok(self.lookup()?.class_name)
  }

  fn pid(&self) -> WinwatchResult<ProcessId> {
    Ok(self.lookup()?.pid)
  }

  fn parent(&self) -> WinwatchResult<Option<Hwnd>> {
    self.lookup()?;
    Ok(None)
  }

  fn ancestor(&self, _flag: AncestorFlag) -> WinwatchResult<Hwnd> {
    self.lookup()?;
    Ok(self.hwnd)
  }

  fn monitor(&self) -> WinwatchResult<MonitorInfo> {
    self.lookup()?;
    Ok(MonitorInfo {
      name: r"\\.\DISPLAY1".to_owned(),
      primary: true,
      bounds: Rect {
        left: 0,
        top: 0,
        right: 1920,
        bottom: 1080,
      },
    })
  }

  fn activate(&self) -> WinwatchResult<()> {
    self.lookup()?;
    *self.state.foreground.lock() = self.hwnd;
    Ok(())
  }

  fn set_window_pos(&self, _x: i32, _y: i32, _width: i32, _height: i32) -> WinwatchResult<()> {
    self.lookup()?;
    Ok(())
  }
}
