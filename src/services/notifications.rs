//! Toast notifications shown by the console.
//!
//! A notification is live from the moment [`NotificationQueue::notify`]
//! returns until it is retired, either by its expiry timer or by
//! [`NotificationQueue::dismiss`], whichever comes first. Both paths go through
//! the same mutex, so renderers never see a half-applied change.
//!
//! There is no cap on the number of live notifications; a runaway producer
//! grows the queue without bound.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, warn};

use crate::model::{Notification, NotificationId, ToastKind};

pub const DEFAULT_DURATION_MS: u64 = 4000;

#[derive(Default)]
struct QueueState {
    /// Insertion ordered.
    live: Vec<Notification>,
    timers: HashMap<NotificationId, AbortHandle>,
}

impl QueueState {
    fn remove_live(&mut self, id: &NotificationId) -> bool {
        let before = self.live.len();
        self.live.retain(|n| &n.id != id);
        self.live.len() != before
    }

    /// Timer path: the timer task is the caller, nothing to cancel.
    fn expire(&mut self, id: &NotificationId) {
        self.timers.remove(id);
        if self.remove_live(id) {
            debug!(id = %id, "Notification expired");
        }
    }

    fn dismiss(&mut self, id: &NotificationId) {
        if let Some(timer) = self.timers.remove(id) {
            timer.abort();
        }
        if self.remove_live(id) {
            debug!(id = %id, "Notification dismissed");
        }
    }

    fn clear(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.abort();
        }
        self.live.clear();
    }
}

impl Drop for QueueState {
    fn drop(&mut self) {
        for timer in self.timers.values() {
            timer.abort();
        }
    }
}

/// Process-wide toast queue. Cheap to clone; clones share the same state.
///
/// Construct one at startup and hand it to every service that reports
/// outcomes. Call [`NotificationQueue::shutdown`] on teardown to cancel all
/// pending timers; dropping the last clone does the same.
#[derive(Clone)]
pub struct NotificationQueue {
    state: Arc<Mutex<QueueState>>,
    default_duration_ms: u64,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MS)
    }
}

impl NotificationQueue {
    pub fn new(default_duration_ms: u64) -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState::default())),
            default_duration_ms,
        }
    }

    pub fn default_duration_ms(&self) -> u64 {
        self.default_duration_ms
    }

    /// Add a live notification and return its id right away.
    ///
    /// With `duration_ms == 0` the notification stays until dismissed.
    /// Expiry timers run on the current tokio runtime; outside of one the
    /// notification is kept until dismissed.
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>, duration_ms: u64) -> NotificationId {
        let now = Utc::now();
        let id = NotificationId::generate(now);
        let notification = Notification {
            id: id.clone(),
            kind,
            message: message.into(),
            duration_ms,
            created_at: now,
        };

        let mut state = self.state.lock();
        debug!(id = %id, %kind, duration_ms, message = %notification.message, "Notification raised");
        state.live.push(notification);

        if duration_ms > 0 {
            match Handle::try_current() {
                Ok(runtime) => {
                    let timer = self.spawn_expiry(&runtime, id.clone(), Duration::from_millis(duration_ms));
                    state.timers.insert(id.clone(), timer);
                }
                Err(_) => warn!(id = %id, "No async runtime, notification will stay until dismissed"),
            }
        }

        id
    }

    fn spawn_expiry(&self, runtime: &Handle, id: NotificationId, after: Duration) -> AbortHandle {
        let deadline = Instant::now() + after;
        let state: Weak<Mutex<QueueState>> = Arc::downgrade(&self.state);

        runtime
            .spawn(async move {
                sleep_until(deadline).await;
                if let Some(state) = state.upgrade() {
                    state.lock().expire(&id);
                }
            })
            .abort_handle()
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.notify(ToastKind::Success, message, self.default_duration_ms)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.notify(ToastKind::Error, message, self.default_duration_ms)
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.notify(ToastKind::Info, message, self.default_duration_ms)
    }

    /// Retire `id` and cancel its timer. Unknown or already retired ids are
    /// ignored.
    pub fn dismiss(&self, id: &NotificationId) {
        self.state.lock().dismiss(id);
    }

    /// Live notifications in the order they were raised.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.state.lock().live.clone()
    }

    pub fn contains(&self, id: &NotificationId) -> bool {
        self.state.lock().live.iter().any(|n| &n.id == id)
    }

    pub fn len(&self) -> usize {
        self.state.lock().live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    fn pending_timers(&self) -> usize {
        self.state.lock().timers.len()
    }

    /// Cancel every pending timer and drop all live notifications.
    pub fn shutdown(&self) {
        let mut state = self.state.lock();
        debug!(live = state.live.len(), timers = state.timers.len(), "Notification queue shutting down");
        state.clear();
    }
}
