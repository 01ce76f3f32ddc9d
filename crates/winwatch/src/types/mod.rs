/*! Core types for winwatch. */

#![allow(missing_docs)]

mod error;
mod event;
mod geometry;
mod ids;
mod monitor;

pub use error::{WinwatchError, WinwatchResult};
pub use event::{EventKind, WindowEvent};
pub use geometry::Rect;
pub use ids::{Hwnd, ListenerId, ProcessId};
pub use monitor::MonitorInfo;
