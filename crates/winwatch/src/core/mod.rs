/*!
Core Winwatch instance - owns detector state, subscriptions, and polling.

# Module Structure

- `mod.rs` - Winwatch struct, construction, pass-through lookups
- `queries.rs` - enumeration adapter and title search
- `subscriptions.rs` - subscribe/unsubscribe and event delivery
- `detectors.rs` - active-window and window-list diff routines

# Example

```ignore
use winwatch::{EventKind, Winwatch, Win32Binding, WindowEvent};

let watch = Winwatch::new(Win32Binding::new())?;

let notepad = watch.find_by_title("Notepad").await?;
notepad.activate()?;

// Polling starts with the first subscriber, stops with the last.
let id = watch.subscribe(EventKind::ActiveWindow, |event| {
    if let WindowEvent::ActiveWindowChanged { current, previous } = event {
        // handle focus change
    }
});
watch.unsubscribe(EventKind::ActiveWindow, id);
```
*/

mod detectors;
mod queries;
mod subscriptions;

pub use queries::TitlePattern;

pub(crate) use subscriptions::Listeners;

use crate::platform::WindowBinding;
use crate::polling::{LoopTable, PollingConfig};
use crate::types::{Hwnd, WinwatchError, WinwatchResult};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Window-event subsystem over an injected binding.
///
/// Clone is cheap (Arc bump) - share freely across tasks. All polling stops
/// when the last clone is dropped. Requires a tokio runtime at construction;
/// loop timers are spawned onto it on demand.
pub struct Winwatch<B: WindowBinding> {
  pub(crate) shared: Arc<Shared<B>>,
}

impl<B: WindowBinding> Clone for Winwatch<B> {
  fn clone(&self) -> Self {
    Self {
      shared: Arc::clone(&self.shared),
    }
  }
}

impl<B: WindowBinding> std::fmt::Debug for Winwatch<B> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Winwatch").finish_non_exhaustive()
  }
}

/// State shared by all clones. Loop timers hold this weakly.
pub(crate) struct Shared<B: WindowBinding> {
  pub(crate) binding: B,
  pub(crate) listeners: Mutex<Listeners<B::Handle>>,
  pub(crate) loops: Mutex<LoopTable>,
  pub(crate) runtime: tokio::runtime::Handle,
  /// Most recently observed foreground window. Written only by the
  /// active-window detector.
  pub(crate) active_window: Mutex<B::Handle>,
  pub(crate) known_windows: Mutex<KnownWindows>,
}

impl<B: WindowBinding> Drop for Shared<B> {
  fn drop(&mut self) {
    self.loops.lock().stop_all();
  }
}

/// Every window observed as visible-with-title since the last reset.
///
/// Append-only between resets; `baseline_taken` (not emptiness) marks whether
/// the next window-list tick is a silent baseline pass, since the set can be
/// legitimately empty right after a reset.
#[derive(Debug, Default)]
pub(crate) struct KnownWindows {
  pub(crate) hwnds: HashSet<Hwnd>,
  pub(crate) baseline_taken: bool,
}

/// Builder for configuring a Winwatch instance.
///
/// # Example
///
/// ```ignore
/// let watch = Winwatch::builder()
///     .active_window_interval_ms(100)
///     .build(Win32Binding::new())?;
/// ```
#[derive(Debug, Default, Clone, Copy)]
#[must_use = "Builder does nothing until .build() is called"]
pub struct WinwatchBuilder {
  config: PollingConfig,
}

impl WinwatchBuilder {
  /// Interval of the foreground-window poll in milliseconds. Default: 50.
  pub const fn active_window_interval_ms(mut self, ms: u64) -> Self {
    self.config.active_window_interval_ms = ms;
    self
  }

  /// Interval of the window-list poll in milliseconds. Default: 50.
  pub const fn window_list_interval_ms(mut self, ms: u64) -> Self {
    self.config.window_list_interval_ms = ms;
    self
  }

  /// Build the Winwatch instance over the given binding.
  ///
  /// Fails outside a tokio runtime, or if the seeding foreground query fails.
  pub fn build<B: WindowBinding>(self, binding: B) -> WinwatchResult<Winwatch<B>> {
    Winwatch::create_with_config(binding, self.config)
  }
}

impl<B: WindowBinding> Winwatch<B> {
  /// Create a new Winwatch instance with default options.
  pub fn new(binding: B) -> WinwatchResult<Self> {
    Self::builder().build(binding)
  }

  /// Create a builder for configuring a new Winwatch instance.
  pub fn builder() -> WinwatchBuilder {
    WinwatchBuilder::default()
  }

  fn create_with_config(binding: B, config: PollingConfig) -> WinwatchResult<Self> {
    let runtime =
      tokio::runtime::Handle::try_current().map_err(|_| WinwatchError::NoRuntime)?;

    // Seed eagerly so the detector's first comparison is against a real
    // baseline, never against "unset".
    let active_window = binding.active_window()?;

    Ok(Self {
      shared: Arc::new(Shared {
        binding,
        listeners: Mutex::new(Listeners::default()),
        loops: Mutex::new(LoopTable::new(&config)),
        runtime,
        active_window: Mutex::new(active_window),
        known_windows: Mutex::new(KnownWindows::default()),
      }),
    })
  }

  /// The injected binding.
  pub fn binding(&self) -> &B {
    &self.shared.binding
  }

  /// Current foreground window (`GetForegroundWindow`).
  pub fn active_window(&self) -> WinwatchResult<B::Handle> {
    self.shared.binding.active_window()
  }

  /// Look up a top-level window by class name (`FindWindowEx`).
  pub fn window_by_class_name(&self, class_name: &str) -> WinwatchResult<B::Handle> {
    self.shared.binding.window_by_class_name(class_name)
  }

  /// Look up a top-level window by exact title (`FindWindow`).
  pub fn window_by_title_exact(&self, title: &str) -> WinwatchResult<B::Handle> {
    self.shared.binding.window_by_title_exact(title)
  }

  /// Forget all known windows and make the next window-list tick a silent
  /// baseline pass.
  pub fn reset_known_windows(&self) {
    let mut known = self.shared.known_windows.lock();
    known.hwnds.clear();
    known.baseline_taken = false;
  }

  #[cfg(test)]
  pub(crate) fn loop_active(&self, name: crate::polling::LoopName) -> bool {
    self.shared.loops.lock().is_active(name)
  }

  #[cfg(test)]
  pub(crate) fn known_hwnds(&self) -> HashSet<Hwnd> {
    self.shared.known_windows.lock().hwnds.clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::fake::FakeBinding;
  use crate::platform::WindowHandle;

  #[test]
  fn construction_outside_a_runtime_fails() {
    let binding = FakeBinding::new();
    binding.set_foreground(1);
    let result = Winwatch::new(binding);
    assert!(matches!(result, Err(WinwatchError::NoRuntime)));
  }

  #[tokio::test]
  async fn construction_seeds_the_active_window() {
    let binding = FakeBinding::new();
    binding.add_window(3, "Seed", true);
    binding.set_foreground(3);

    let watch = Winwatch::new(binding).expect("construction");
    assert_eq!(watch.shared.active_window.lock().hwnd(), Hwnd(3));
  }

  #[tokio::test]
  async fn pass_through_lookups_delegate_to_the_binding() {
    let binding = FakeBinding::new();
    binding.add_window(1, "Editor", true);
    binding.set_foreground(1);
    let watch = Winwatch::new(binding).expect("construction");

    let by_title = watch.window_by_title_exact("Editor").expect("by title");
    assert_eq!(by_title.hwnd(), Hwnd(1));

    let by_class = watch
      .window_by_class_name("FakeClassEditor")
      .expect("by class");
    assert_eq!(by_class.hwnd(), Hwnd(1));

    assert_eq!(watch.active_window().expect("active").hwnd(), Hwnd(1));
  }
}
