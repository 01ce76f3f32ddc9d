/*!
Change detectors, invoked by the polling scheduler.

Both contain their own failures: a failed tick is "no change" and the next
tick runs at the normal interval. Nothing here is allowed to reach the timer
machinery.
*/

use super::Shared;
use crate::platform::{WindowBinding, WindowHandle};
use crate::types::{WindowEvent, WinwatchResult};

impl<B: WindowBinding> Shared<B> {
  /// Active-window detector: one foreground query, one comparison, at most
  /// one event. Synchronous end-to-end, so ticks never overlap in practice.
  pub(crate) fn check_active_window(&self) {
    let current = match self.binding.active_window() {
      Ok(handle) => handle,
      Err(err) => {
        log::debug!("foreground query failed, treating as no change: {err}");
        return;
      }
    };

    let previous = self.active_window.lock().clone();
    if current.hwnd() == previous.hwnd() {
      return;
    }

    self.publish(&WindowEvent::ActiveWindowChanged {
      current: current.clone(),
      previous,
    });
    *self.active_window.lock() = current;
  }

  /// Window-list detector: enumerate visible, titled windows and publish
  /// open-window for handles not yet known.
  ///
  /// Ticks may overlap (the enumeration is the await point); that is safe
  /// because the known set is insert-only and `insert`'s return value decides
  /// emission, so two in-flight ticks cannot double-emit one handle. The
  /// baseline flag is claimed before the enumeration so a pass that started
  /// as the baseline stays silent even if a later tick finishes first.
  pub(crate) async fn check_new_windows(&self) {
    let baseline_pass = {
      let mut known = self.known_windows.lock();
      let first = !known.baseline_taken;
      known.baseline_taken = true;
      first
    };

    let windows = match self.visible_titled_windows().await {
      Ok(windows) => windows,
      Err(err) => {
        log::debug!("window-list tick failed: {err}");
        return;
      }
    };

    for window in windows {
      let newly_known = self.known_windows.lock().hwnds.insert(window.hwnd());
      if newly_known && !baseline_pass {
        self.publish(&WindowEvent::WindowOpened { window });
      }
    }
  }

  /// All windows currently visible with a non-empty title. A window whose
  /// accessors fail (destroyed mid-enumeration) is excluded, not fatal.
  async fn visible_titled_windows(&self) -> WinwatchResult<Vec<B::Handle>> {
    self.find_windows_with(&mut |window| {
      let visible = match window.is_visible() {
        Ok(visible) => visible,
        Err(err) => {
          log::debug!("skipping window {}: {err}", window.hwnd());
          return false;
        }
      };
      let titled = match window.title() {
        Ok(title) => !title.is_empty(),
        Err(err) => {
          log::debug!("skipping window {}: {err}", window.hwnd());
          return false;
        }
      };
      visible && titled
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::Winwatch;
  use crate::platform::fake::FakeBinding;
  use crate::types::{EventKind, Hwnd};
  use parking_lot::Mutex;
  use std::sync::Arc;

  fn fresh_watch() -> (FakeBinding, Winwatch<FakeBinding>) {
    let binding = FakeBinding::new();
    binding.add_window(1, "Seed", true);
    binding.set_foreground(1);
    let watch = Winwatch::new(binding.clone()).expect("construction");
    (binding, watch)
  }

  fn collect_active(watch: &Winwatch<FakeBinding>) -> Arc<Mutex<Vec<(Hwnd, Hwnd)>>> {
    let seen: Arc<Mutex<Vec<(Hwnd, Hwnd)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    watch.subscribe(EventKind::ActiveWindow, move |event| {
      if let WindowEvent::ActiveWindowChanged { current, previous } = event {
        sink.lock().push((current.hwnd(), previous.hwnd()));
      }
    });
    seen
  }

  fn collect_opened(watch: &Winwatch<FakeBinding>) -> Arc<Mutex<Vec<Hwnd>>> {
    let seen: Arc<Mutex<Vec<Hwnd>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    watch.subscribe(EventKind::OpenWindow, move |event| {
      if let WindowEvent::WindowOpened { window } = event {
        sink.lock().push(window.hwnd());
      }
    });
    seen
  }

  mod active_window {
    use super::*;

    #[tokio::test]
    async fn change_emits_current_then_previous() {
      let (binding, watch) = fresh_watch();
      binding.add_window(2, "Other", true);
      let seen = collect_active(&watch);

      binding.set_foreground(2);
      watch.shared.check_active_window();

      assert_eq!(seen.lock().as_slice(), &[(Hwnd(2), Hwnd(1))]);
    }

    #[tokio::test]
    async fn unchanged_foreground_emits_nothing() {
      let (_binding, watch) = fresh_watch();
      let seen = collect_active(&watch);

      watch.shared.check_active_window();
      watch.shared.check_active_window();

      assert!(seen.lock().is_empty());
    }

    #[tokio::test]
    async fn failed_query_is_no_change() {
      let (binding, watch) = fresh_watch();
      binding.add_window(2, "Other", true);
      let seen = collect_active(&watch);

      binding.set_foreground(2);
      binding.fail_active_query(true);
      watch.shared.check_active_window();
      assert!(seen.lock().is_empty(), "failure swallowed, no event");

      binding.fail_active_query(false);
      watch.shared.check_active_window();
      assert_eq!(
        seen.lock().as_slice(),
        &[(Hwnd(2), Hwnd(1))],
        "state untouched by the failed tick"
      );
    }
  }

  mod window_list {
    use super::*;

    #[tokio::test]
    async fn first_tick_is_a_silent_baseline() {
      let (binding, watch) = fresh_watch();
      binding.add_window(2, "Existing", true);
      binding.add_window(3, "Another", true);
      let seen = collect_opened(&watch);

      watch.shared.check_new_windows().await;

      assert!(seen.lock().is_empty(), "baseline never emits");
      assert_eq!(
        watch.known_hwnds(),
        [Hwnd(1), Hwnd(2), Hwnd(3)].into_iter().collect()
      );
    }

    #[tokio::test]
    async fn new_window_emits_after_baseline() {
      let (binding, watch) = fresh_watch();
      let seen = collect_opened(&watch);

      watch.shared.check_new_windows().await;
      binding.add_window(5, "Newcomer", true);
      watch.shared.check_new_windows().await;
      watch.shared.check_new_windows().await;

      assert_eq!(seen.lock().as_slice(), &[Hwnd(5)], "emitted exactly once");
    }

    #[tokio::test]
    async fn invisible_and_title_less_windows_are_never_tracked() {
      let (binding, watch) = fresh_watch();
      let seen = collect_opened(&watch);

      watch.shared.check_new_windows().await;
      binding.add_window(5, "", true);
      binding.add_window(6, "Hidden", false);
      watch.shared.check_new_windows().await;

      assert!(seen.lock().is_empty());
      assert_eq!(watch.known_hwnds(), [Hwnd(1)].into_iter().collect());
    }

    #[tokio::test]
    async fn retitled_to_empty_is_excluded_but_not_forgotten() {
      let (binding, watch) = fresh_watch();
      let seen = collect_opened(&watch);

      watch.shared.check_new_windows().await;
      assert!(watch.known_hwnds().contains(&Hwnd(1)));

      binding.set_title(1, "");
      watch.shared.check_new_windows().await;

      // Excluded from this tick's snapshot, but the known set is append-only.
      assert!(watch.known_hwnds().contains(&Hwnd(1)));

      // Restoring the title does not re-emit: the handle is already known.
      binding.set_title(1, "Seed again");
      watch.shared.check_new_windows().await;
      assert!(seen.lock().is_empty());
    }

    #[tokio::test]
    async fn destroyed_window_mid_tick_is_skipped() {
      let (binding, watch) = fresh_watch();
      binding.add_window(2, "Doomed", true);
      let seen = collect_opened(&watch);

      watch.shared.check_new_windows().await;
      binding.close_window(2);
      binding.add_window(3, "Fresh", true);
      watch.shared.check_new_windows().await;

      assert_eq!(seen.lock().as_slice(), &[Hwnd(3)]);
      // Closed windows are never removed; close-window detection is
      // intentionally unimplemented.
      assert!(watch.known_hwnds().contains(&Hwnd(2)));
    }

    #[tokio::test]
    async fn reset_makes_the_next_tick_a_baseline_again() {
      let (binding, watch) = fresh_watch();
      let seen = collect_opened(&watch);

      watch.shared.check_new_windows().await;
      binding.add_window(5, "Newcomer", true);

      watch.reset_known_windows();
      watch.shared.check_new_windows().await;
      assert!(
        seen.lock().is_empty(),
        "post-reset pass re-baselines silently"
      );

      binding.add_window(6, "Later", true);
      watch.shared.check_new_windows().await;
      assert_eq!(seen.lock().as_slice(), &[Hwnd(6)]);
    }
  }
}
