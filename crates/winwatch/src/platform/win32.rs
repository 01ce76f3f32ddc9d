/*!
Win32 implementation of the binding traits.

Handles are stored as raw `isize` values so they stay `Send + Sync`; the
`HWND` is rebuilt at each call site. Accessors check `IsWindow` first so a
destroyed window surfaces as `WindowGone` instead of an empty read.
*/

#![allow(unsafe_code)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::flags::AncestorFlag;
use crate::platform::{WindowBinding, WindowHandle};
use crate::types::{Hwnd, MonitorInfo, ProcessId, Rect, WinwatchError, WinwatchResult};

use windows::core::PCWSTR;
use windows::Win32::Foundation::{HWND, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
  GetMonitorInfoW, MonitorFromWindow, MONITORINFO, MONITORINFOEXW, MONITOR_DEFAULTTONEAREST,
};
use windows::Win32::UI::WindowsAndMessaging::{
  EnumWindows, FindWindowExW, FindWindowW, GetAncestor, GetClassNameW, GetForegroundWindow,
  GetParent, GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId, IsWindow,
  IsWindowVisible, SetForegroundWindow, SetWindowPos, GET_ANCESTOR_FLAGS, SWP_NOZORDER,
};

const MONITORINFOF_PRIMARY: u32 = 1;

/// Production binding backed by the Win32 window-management API.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Binding;

impl Win32Binding {
  /// Create the binding. Stateless; all state lives in the OS.
  pub const fn new() -> Self {
    Self
  }
}

/// A Win32 window handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Win32Handle {
  raw: Hwnd,
}

impl Win32Handle {
  fn from_hwnd(hwnd: HWND) -> Self {
    Self {
      raw: Hwnd(hwnd.0 as isize),
    }
  }

  fn as_hwnd(&self) -> HWND {
    HWND(self.raw.0 as *mut core::ffi::c_void)
  }

  /// Fail with `WindowGone` if the window has been destroyed.
  fn check_alive(&self) -> WinwatchResult<HWND> {
    let hwnd = self.as_hwnd();
    if unsafe { IsWindow(Some(hwnd)) }.as_bool() {
      Ok(hwnd)
    } else {
      Err(WinwatchError::WindowGone(self.raw))
    }
  }
}

fn to_wide(s: &str) -> Vec<u16> {
  s.encode_utf16().chain(std::iter::once(0)).collect()
}

struct EnumState<'a> {
  visit: &'a mut dyn FnMut(Win32Handle) -> bool,
  stopped: bool,
}

extern "system" fn enum_proc(hwnd: HWND, lparam: LPARAM) -> windows::core::BOOL {
  // Safety: lparam is the EnumState pointer passed to EnumWindows below,
  // valid for the duration of the synchronous enumeration.
  let state = unsafe { &mut *(lparam.0 as *mut EnumState<'_>) };
  let keep_going = (state.visit)(Win32Handle::from_hwnd(hwnd));
  if !keep_going {
    state.stopped = true;
  }
  keep_going.into()
}

impl WindowBinding for Win32Binding {
  type Handle = Win32Handle;

  fn active_window(&self) -> WinwatchResult<Self::Handle> {
    // A null HWND (no window has focus) is still a handle.
    Ok(Win32Handle::from_hwnd(unsafe { GetForegroundWindow() }))
  }

  fn window_by_class_name(&self, class_name: &str) -> WinwatchResult<Self::Handle> {
    let class = to_wide(class_name);
    let hwnd = unsafe { FindWindowExW(None, None, PCWSTR(class.as_ptr()), PCWSTR::null()) }
      .map_err(|err| WinwatchError::Platform(err.to_string()))?;
    Ok(Win32Handle::from_hwnd(hwnd))
  }

  fn window_by_title_exact(&self, title: &str) -> WinwatchResult<Self::Handle> {
    let title = to_wide(title);
    let hwnd = unsafe { FindWindowW(PCWSTR::null(), PCWSTR(title.as_ptr())) }
      .map_err(|err| WinwatchError::Platform(err.to_string()))?;
    Ok(Win32Handle::from_hwnd(hwnd))
  }

  fn enumerate_windows(
    &self,
    visit: &mut dyn FnMut(Self::Handle) -> bool,
  ) -> WinwatchResult<()> {
    let mut state = EnumState {
      visit,
      stopped: false,
    };
    let lparam = LPARAM(std::ptr::addr_of_mut!(state) as isize);
    let result = unsafe { EnumWindows(Some(enum_proc), lparam) };
    match result {
      Ok(()) => Ok(()),
      // EnumWindows reports an early callback stop as failure.
      Err(_) if state.stopped => Ok(()),
      Err(err) => Err(WinwatchError::Platform(err.to_string())),
    }
  }
}

impl WindowHandle for Win32Handle {
  fn hwnd(&self) -> Hwnd {
    self.raw
  }

  fn exists(&self) -> bool {
    unsafe { IsWindow(Some(self.as_hwnd())) }.as_bool()
  }

  fn is_visible(&self) -> WinwatchResult<bool> {
    let hwnd = self.check_alive()?;
    Ok(unsafe { IsWindowVisible(hwnd) }.as_bool())
  }

  fn title(&self) -> WinwatchResult<String> {
    let hwnd = self.check_alive()?;
    let len = unsafe { GetWindowTextLengthW(hwnd) };
    if len == 0 {
      return Ok(String::new());
    }
    let mut buffer = vec![0u16; (len + 1) as usize];
    let copied = unsafe { GetWindowTextW(hwnd, &mut buffer) };
    Ok(String::from_utf16_lossy(
      buffer.get(..copied as usize).unwrap_or_default(),
    ))
  }

  fn class_name(&self) -> WinwatchResult<String> {
    let hwnd = self.check_alive()?;
    let mut buffer = [0u16; 256];
    let copied = unsafe { GetClassNameW(hwnd, &mut buffer) };
    Ok(String::from_utf16_lossy(
      buffer.get(..copied as usize).unwrap_or_default(),
    ))
  }

  fn pid(&self) -> WinwatchResult<ProcessId> {
    let hwnd = self.check_alive()?;
    let mut pid: u32 = 0;
    unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
    Ok(ProcessId(pid))
  }

  fn parent(&self) -> WinwatchResult<Option<Hwnd>> {
    let hwnd = self.check_alive()?;
    // GetParent fails for top-level windows; that is "no parent", not an error.
    Ok(
      unsafe { GetParent(hwnd) }
        .ok()
        .filter(|parent| !parent.0.is_null())
        .map(|parent| Hwnd(parent.0 as isize)),
    )
  }

  fn ancestor(&self, flag: AncestorFlag) -> WinwatchResult<Hwnd> {
    let hwnd = self.check_alive()?;
    let ancestor = unsafe { GetAncestor(hwnd, GET_ANCESTOR_FLAGS(flag as u32)) };
    Ok(Hwnd(ancestor.0 as isize))
  }

  fn monitor(&self) -> WinwatchResult<MonitorInfo> {
    let hwnd = self.check_alive()?;
    let hmonitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };

    let mut info = MONITORINFOEXW {
      monitorInfo: MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFOEXW>() as u32,
        ..Default::default()
      },
      ..Default::default()
    };
    let ok = unsafe {
      GetMonitorInfoW(
        hmonitor,
        std::ptr::addr_of_mut!(info).cast::<MONITORINFO>(),
      )
    };
    if !ok.as_bool() {
      return Err(WinwatchError::Platform("GetMonitorInfoW failed".into()));
    }

    let name_len = info
      .szDevice
      .iter()
      .position(|&c| c == 0)
      .unwrap_or(info.szDevice.len());
    Ok(MonitorInfo {
      name: String::from_utf16_lossy(info.szDevice.get(..name_len).unwrap_or_default()),
      primary: info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
      bounds: rect_from(info.monitorInfo.rcMonitor),
    })
  }

  fn activate(&self) -> WinwatchResult<()> {
    let hwnd = self.check_alive()?;
    if unsafe { SetForegroundWindow(hwnd) }.as_bool() {
      Ok(())
    } else {
      Err(WinwatchError::Platform(
        "SetForegroundWindow was refused".into(),
      ))
    }
  }

  fn set_window_pos(&self, x: i32, y: i32, width: i32, height: i32) -> WinwatchResult<()> {
    let hwnd = self.check_alive()?;
    unsafe { SetWindowPos(hwnd, None, x, y, width, height, SWP_NOZORDER) }
      .map_err(|err| WinwatchError::Platform(err.to_string()))
  }
}

const fn rect_from(rect: RECT) -> Rect {
  Rect {
    left: rect.left,
    top: rect.top,
    right: rect.right,
    bottom: rect.bottom,
  }
}
