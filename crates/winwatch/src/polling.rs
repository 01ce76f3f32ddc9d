/*!
Demand-driven polling scheduler.

Owns one named loop per detector. A loop's timer runs iff the aggregate
subscriber count across the event kinds it serves is > 0; every subscribe or
unsubscribe recomputes all loops rather than tracking deltas. Consumers don't
interact with this directly - loops are owned by `Winwatch`.
*/

use crate::core::Shared;
use crate::platform::WindowBinding;
use crate::types::EventKind;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

const DEFAULT_POLLING_INTERVAL_MS: u64 = 50;

/// Identifies one polling loop. Closed set, dispatched exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopName {
  ActiveWindow,
  WindowList,
}

impl LoopName {
  pub(crate) const ALL: [Self; 2] = [Self::ActiveWindow, Self::WindowList];

  /// The event kinds this loop serves. The window-list loop serves both
  /// open-window and close-window so one OS poll covers both subscriptions.
  pub(crate) const fn served_kinds(self) -> &'static [EventKind] {
    match self {
      Self::ActiveWindow => &[EventKind::ActiveWindow],
      Self::WindowList => &[EventKind::OpenWindow, EventKind::CloseWindow],
    }
  }
}

/// Intervals for the two loops, set through `WinwatchBuilder`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PollingConfig {
  pub(crate) active_window_interval_ms: u64,
  pub(crate) window_list_interval_ms: u64,
}

impl Default for PollingConfig {
  fn default() -> Self {
    Self {
      active_window_interval_ms: DEFAULT_POLLING_INTERVAL_MS,
      window_list_interval_ms: DEFAULT_POLLING_INTERVAL_MS,
    }
  }
}

struct PollingLoop {
  name: LoopName,
  interval: Duration,
  /// Some while ≥1 served event kind has a subscriber.
  timer: Option<JoinHandle<()>>,
}

/// The fixed set of loops. One record per detector, created at construction.
pub(crate) struct LoopTable {
  loops: Vec<PollingLoop>,
}

impl std::fmt::Debug for LoopTable {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("LoopTable").finish_non_exhaustive()
  }
}

impl LoopTable {
  pub(crate) fn new(config: &PollingConfig) -> Self {
    Self {
      loops: vec![
        PollingLoop {
          name: LoopName::ActiveWindow,
          interval: Duration::from_millis(config.active_window_interval_ms),
          timer: None,
        },
        PollingLoop {
          name: LoopName::WindowList,
          interval: Duration::from_millis(config.window_list_interval_ms),
          timer: None,
        },
      ],
    }
  }

  /// Abort every active timer. Called when the last `Winwatch` clone drops.
  pub(crate) fn stop_all(&mut self) {
    for lp in &mut self.loops {
      if let Some(timer) = lp.timer.take() {
        timer.abort();
      }
    }
  }

  #[cfg(test)]
  pub(crate) fn is_active(&self, name: LoopName) -> bool {
    self
      .loops
      .iter()
      .any(|lp| lp.name == name && lp.timer.is_some())
  }
}

/// Recompute active/inactive for every loop from current subscriber counts.
///
/// Intentionally recomputes all loops on every call: idempotent, and
/// correctness does not depend on which subscription triggered the recheck.
///
/// Counts are read while the loop table is locked, so two concurrent calls
/// cannot apply their snapshots out of order and leave a live subscriber
/// without a timer. Lock order is loops then listeners; no other path holds
/// the listeners lock while taking the loop table.
pub(crate) fn update_polling_loops<B: WindowBinding>(shared: &Arc<Shared<B>>) {
  let mut table = shared.loops.lock();

  let counts: Vec<(LoopName, usize)> = {
    let listeners = shared.listeners.lock();
    LoopName::ALL
      .into_iter()
      .map(|name| {
        let count = name
          .served_kinds()
          .iter()
          .map(|kind| listeners.count(*kind))
          .sum();
        (name, count)
      })
      .collect()
  };

  for (name, count) in counts {
    let Some(lp) = table.loops.iter_mut().find(|lp| lp.name == name) else {
      continue;
    };
    match (&lp.timer, count > 0) {
      (None, true) => {
        log::debug!("starting {name:?} loop ({:?} interval)", lp.interval);
        lp.timer = Some(spawn_loop(shared, name, lp.interval));
      }
      (Some(_), false) => {
        log::debug!("stopping {name:?} loop");
        if let Some(timer) = lp.timer.take() {
          timer.abort();
        }
      }
      _ => {}
    }
  }
}

/// Spawn the repeating timer task for one loop.
///
/// Each tick spawns the detector invocation as its own task, so the timer is
/// independent of any single tick's completion and window-list ticks may
/// overlap. The task holds only a weak reference; it exits once the owning
/// `Winwatch` is gone.
fn spawn_loop<B: WindowBinding>(
  shared: &Arc<Shared<B>>,
  name: LoopName,
  interval: Duration,
) -> JoinHandle<()> {
  let weak = Arc::downgrade(shared);
  shared.runtime.spawn(async move {
    // First tick after one full interval, like setInterval.
    let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
      ticker.tick().await;
      let Some(shared) = weak.upgrade() else { break };
      tokio::spawn(run_detector(shared, name));
    }
  })
}

async fn run_detector<B: WindowBinding>(shared: Arc<Shared<B>>, name: LoopName) {
  match name {
    LoopName::ActiveWindow => shared.check_active_window(),
    LoopName::WindowList => shared.check_new_windows().await,
  }
}
