/*!
winwatch - Win32 window enumeration, lookup, and change-event polling.

The heavy lifting (reading window properties, walking the Z-order, moving
windows) is done by a native binding behind the [`WindowBinding`] /
[`WindowHandle`] traits; this crate adds filterable enumeration, regex title
search, and a demand-driven polling subsystem that emits change events only
while someone is listening.

```ignore
use winwatch::{EventKind, Win32Binding, WindowEvent, Winwatch};

let watch = Winwatch::new(Win32Binding::new())?;

// Queries
let all = watch.windows().await?;
let editors = watch.find_windows(|w| w.class_name().is_ok_and(|c| c == "Notepad")).await?;
let found = watch.find_by_title("Untitled - Notepad").await?;
found.set_window_pos(0, 0, 800, 600)?;

// Events - polling runs only while subscribers exist
let id = watch.subscribe(EventKind::ActiveWindow, |event| {
    if let WindowEvent::ActiveWindowChanged { current, previous } = event {
        // foreground moved from previous to current
    }
});
watch.unsubscribe(EventKind::ActiveWindow, id);

// All polling stops when the last clone drops
drop(watch);
```
*/

mod core;
mod platform;
mod polling;

pub mod flags;

mod types;
pub use types::*;

pub use crate::core::{TitlePattern, Winwatch, WinwatchBuilder};
pub use crate::platform::{WindowBinding, WindowHandle};

#[cfg(target_os = "windows")]
pub use crate::platform::{Win32Binding, Win32Handle};
