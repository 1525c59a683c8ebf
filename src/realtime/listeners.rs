//! Per-type listener table for inbound realtime messages.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Callback invoked with the payload of each matching message.
pub type Listener = Arc<dyn Fn(&Value) + Send + Sync>;

/// Handle returned by registration, used to remove that listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listeners keyed by message type, kept in registration order.
///
/// Dispatch works on a snapshot taken under the lock, and callbacks run
/// after it is released, so a callback may register or remove listeners.
/// Changes made during a dispatch apply from the next message on.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: AtomicU64,
    by_type: Mutex<HashMap<String, Vec<(ListenerId, Listener)>>>,
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<String, usize> = self
            .table()
            .iter()
            .map(|(t, l)| (t.clone(), l.len()))
            .collect();
        f.debug_struct("ListenerRegistry")
            .field("listeners", &counts)
            .finish()
    }
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<String, Vec<(ListenerId, Listener)>>> {
        self.by_type.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, message_type: &str, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.table()
            .entry(message_type.to_string())
            .or_default()
            .push((id, listener));
        id
    }

    /// Remove one listener. Returns false if it was not registered under
    /// `message_type`.
    pub fn remove(&self, message_type: &str, id: ListenerId) -> bool {
        let mut table = self.table();
        let Some(listeners) = table.get_mut(message_type) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        let removed = listeners.len() != before;
        if listeners.is_empty() {
            table.remove(message_type);
        }
        removed
    }

    pub fn count(&self, message_type: &str) -> usize {
        self.table().get(message_type).map_or(0, Vec::len)
    }

    /// Invoke every listener for `message_type` in registration order.
    /// Returns how many were called.
    pub fn dispatch(&self, message_type: &str, payload: &Value) -> usize {
        let snapshot: Vec<Listener> = match self.table().get(message_type) {
            Some(listeners) => listeners.iter().map(|(_, l)| Arc::clone(l)).collect(),
            None => return 0,
        };
        for listener in &snapshot {
            listener(payload);
        }
        snapshot.len()
    }
}
