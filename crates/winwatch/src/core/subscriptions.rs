/*!
Subscribe/unsubscribe methods and event delivery.

Delivery is synchronous and in subscription order. Listener snapshots are
taken under the lock and invoked outside it, so a listener may subscribe or
unsubscribe reentrantly.
*/

use super::{Shared, Winwatch};
use crate::platform::WindowBinding;
use crate::polling;
use crate::types::{EventKind, ListenerId, WindowEvent};
use std::sync::Arc;

/// A subscriber callback. Invoked on the detector's task.
pub(crate) type Listener<H> = Arc<dyn Fn(&WindowEvent<H>) + Send + Sync>;

struct Entry<H> {
  kind: EventKind,
  id: ListenerId,
  callback: Listener<H>,
}

/// Registered listeners, flat in subscription order.
pub(crate) struct Listeners<H> {
  entries: Vec<Entry<H>>,
}

impl<H> Default for Listeners<H> {
  fn default() -> Self {
    Self {
      entries: Vec::new(),
    }
  }
}

impl<H> std::fmt::Debug for Listeners<H> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Listeners")
      .field("len", &self.entries.len())
      .finish_non_exhaustive()
  }
}

impl<H> Listeners<H> {
  fn add(&mut self, kind: EventKind, id: ListenerId, callback: Listener<H>) {
    self.entries.push(Entry { kind, id, callback });
  }

  fn remove(&mut self, kind: EventKind, id: ListenerId) -> bool {
    let before = self.entries.len();
    self.entries.retain(|e| !(e.kind == kind && e.id == id));
    self.entries.len() != before
  }

  fn remove_all(&mut self, kind: EventKind) {
    self.entries.retain(|e| e.kind != kind);
  }

  /// Subscriber count for one event kind.
  pub(crate) fn count(&self, kind: EventKind) -> usize {
    self.entries.iter().filter(|e| e.kind == kind).count()
  }

  fn snapshot(&self, kind: EventKind) -> Vec<Listener<H>> {
    self
      .entries
      .iter()
      .filter(|e| e.kind == kind)
      .map(|e| Arc::clone(&e.callback))
      .collect()
  }
}

impl<B: WindowBinding> Winwatch<B> {
  /// Subscribe to an event kind. The loop serving it starts if this is its
  /// first subscriber.
  ///
  /// The same closure may be subscribed more than once; each call is an
  /// independent subscription with its own id.
  pub fn subscribe(
    &self,
    kind: EventKind,
    listener: impl Fn(&WindowEvent<B::Handle>) + Send + Sync + 'static,
  ) -> ListenerId {
    let id = ListenerId::new();
    self
      .shared
      .listeners
      .lock()
      .add(kind, id, Arc::new(listener));
    polling::update_polling_loops(&self.shared);
    id
  }

  /// Remove one subscription. Returns whether it existed. The loop serving
  /// `kind` stops if no subscriber for any of its kinds remains.
  pub fn unsubscribe(&self, kind: EventKind, id: ListenerId) -> bool {
    let removed = self.shared.listeners.lock().remove(kind, id);
    polling::update_polling_loops(&self.shared);
    removed
  }

  /// Remove every subscription for one event kind.
  pub fn unsubscribe_all(&self, kind: EventKind) {
    self.shared.listeners.lock().remove_all(kind);
    polling::update_polling_loops(&self.shared);
  }
}

impl<B: WindowBinding> Shared<B> {
  /// Deliver an event to all subscribers of its kind, in subscription order.
  pub(crate) fn publish(&self, event: &WindowEvent<B::Handle>) {
    let listeners = self.listeners.lock().snapshot(event.kind());
    for listener in listeners {
      listener(event);
    }
  }
}
