//! Transient user-facing notifications for Prepkit.
//!
//! One process-wide ordered queue of toasts, shared by reference across
//! every consumer: callers push through [`NotificationCenter::add`] (or
//! the kind shorthands), UI surfaces subscribe to the live sequence and
//! render it. Each notification with a non-zero duration gets a one-shot
//! auto-dismiss timer; an early manual dismissal cancels the timer, and a
//! timer that fires after its notification is already gone is a harmless
//! no-op.
//!
//! # Integration
//!
//! ```ignore
//! let notify = NotificationCenter::new();
//! let mut feed = notify.subscribe();
//!
//! notify.success("Profile saved");
//!
//! while feed.changed().await.is_ok() {
//!     render(&feed.borrow_and_update());
//! }
//! ```
//!
//! Timers are spawned on the ambient Tokio runtime, so `add` must be
//! called from within one.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Auto-dismiss delay applied when the caller doesn't specify one.
pub const DEFAULT_AUTO_DISMISS: Duration = Duration::from_millis(5000);

// ---------------------------------------------------------------------------
// Identity and kind
// ---------------------------------------------------------------------------

/// Identifier of a queued notification, unique among notifications alive
/// at the same time (monotonic, never reused within a process).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N-{}", self.0)
    }
}

/// Visual category of a notification. Lowercase on the wire, matching
/// what UI themes key off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// A queued notification as consumers see it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: Option<String>,
    pub message: String,
    /// Remaining lifecycle: `Some(d)` auto-dismisses after `d`, `None`
    /// stays until removed explicitly.
    pub auto_dismiss: Option<Duration>,
    pub dismissible: bool,
}

/// What a caller hands to [`NotificationCenter::add`]. Unset fields get
/// the defaults: auto-dismiss after [`DEFAULT_AUTO_DISMISS`], dismissible.
///
/// An explicit `Duration::ZERO` disables auto-dismiss entirely (a sticky
/// notification), which is different from leaving the field unset.
#[derive(Debug, Clone)]
pub struct NotificationSpec {
    pub kind: NotificationKind,
    pub message: String,
    pub title: Option<String>,
    pub duration: Option<Duration>,
    pub dismissible: Option<bool>,
}

impl NotificationSpec {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            title: None,
            duration: None,
            dismissible: None,
        }
    }

    /// Short label shown above the message.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Auto-dismiss delay. `Duration::ZERO` means never auto-dismiss.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Keeps the notification until it is removed explicitly.
    pub fn sticky(self) -> Self {
        self.duration(Duration::ZERO)
    }

    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }
}

// ---------------------------------------------------------------------------
// NotificationCenter
// ---------------------------------------------------------------------------

/// Handle to the shared notification queue. Cheap to clone — every clone
/// mutates the same sequence and the same timer table.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<CenterInner>,
}

struct CenterInner {
    /// The live ordered sequence. All mutations go through
    /// `send_modify`, so each add/remove/clear is one whole step as far
    /// as observers are concerned.
    queue: watch::Sender<Vec<Notification>>,

    /// Pending auto-dismiss tasks, keyed by the notification they will
    /// remove. An entry is taken out either by the timer itself firing
    /// or by an early removal aborting it.
    timers: Mutex<HashMap<NotificationId, JoinHandle<()>>>,

    next_id: AtomicU64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CenterInner {
                queue: watch::Sender::new(Vec::new()),
                timers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Queues a notification and returns its id so the caller can dismiss
    /// it early. Display order is arrival order.
    pub fn add(&self, spec: NotificationSpec) -> NotificationId {
        let id = NotificationId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));

        // Resolve defaults: unset duration → the default delay; an
        // explicit zero → sticky.
        let auto_dismiss = match spec.duration.unwrap_or(DEFAULT_AUTO_DISMISS) {
            Duration::ZERO => None,
            d => Some(d),
        };

        let notification = Notification {
            id,
            kind: spec.kind,
            title: spec.title,
            message: spec.message,
            auto_dismiss,
            dismissible: spec.dismissible.unwrap_or(true),
        };

        self.inner
            .queue
            .send_modify(|queue| queue.push(notification));

        if let Some(delay) = auto_dismiss {
            let center = self.clone();
            let handle = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                center.remove(id);
            });
            self.inner
                .timers
                .lock()
                .expect("timer table lock poisoned")
                .insert(id, handle);
        }

        debug!(%id, kind = ?spec.kind, auto_dismiss = ?auto_dismiss, "notification queued");
        id
    }

    /// Removes a notification by id. Safe to call any number of times and
    /// from either side of the manual-dismiss/auto-dismiss race: a miss
    /// is a no-op, not an error.
    pub fn remove(&self, id: NotificationId) {
        // Take the timer out first so an early manual dismissal cancels
        // the pending auto-dismiss. When the timer itself is the caller,
        // its entry is already running; aborting it here is harmless.
        if let Some(handle) = self
            .inner
            .timers
            .lock()
            .expect("timer table lock poisoned")
            .remove(&id)
        {
            handle.abort();
        }

        self.inner.queue.send_modify(|queue| {
            let before = queue.len();
            queue.retain(|n| n.id != id);
            if queue.len() < before {
                debug!(%id, "notification removed");
            }
        });
    }

    /// Empties the queue and cancels every pending auto-dismiss.
    pub fn clear_all(&self) {
        let handles: Vec<JoinHandle<()>> = {
            let mut timers = self
                .inner
                .timers
                .lock()
                .expect("timer table lock poisoned");
            timers.drain().map(|(_, handle)| handle).collect()
        };
        for handle in &handles {
            handle.abort();
        }

        self.inner.queue.send_modify(|queue| queue.clear());
        debug!(cancelled_timers = handles.len(), "notification queue cleared");
    }

    // -- Kind shorthands ----------------------------------------------------
    // Titles and other overrides go through `NotificationSpec` directly;
    // these cover the common message-only case.

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationSpec::new(NotificationKind::Success, message))
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationSpec::new(NotificationKind::Error, message))
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationSpec::new(NotificationKind::Warning, message))
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.add(NotificationSpec::new(NotificationKind::Info, message))
    }

    // -- Consumers ------------------------------------------------------------

    /// Subscribes to the live sequence. The receiver observes every
    /// mutation as a whole step, in order.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.inner.queue.subscribe()
    }

    /// A point-in-time copy of the active notifications, in display order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.queue.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.queue.borrow().is_empty()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for types and default resolution. Timer behavior lives
    //! in `tests/notification_center.rs` where time can be paused.

    use super::*;

    #[test]
    fn test_notification_id_display() {
        assert_eq!(NotificationId(7).to_string(), "N-7");
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&NotificationKind::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }

    #[test]
    fn test_spec_builder_sets_fields() {
        let spec = NotificationSpec::new(NotificationKind::Error, "boom")
            .title("Failed")
            .duration(Duration::from_millis(100))
            .dismissible(false);
        assert_eq!(spec.message, "boom");
        assert_eq!(spec.title.as_deref(), Some("Failed"));
        assert_eq!(spec.duration, Some(Duration::from_millis(100)));
        assert_eq!(spec.dismissible, Some(false));
    }

    #[test]
    fn test_sticky_is_zero_duration() {
        let spec = NotificationSpec::new(NotificationKind::Info, "pinned").sticky();
        assert_eq!(spec.duration, Some(Duration::ZERO));
    }

    #[tokio::test]
    async fn test_add_applies_defaults() {
        let center = NotificationCenter::new();
        let id = center.add(NotificationSpec::new(NotificationKind::Info, "hello"));

        let queue = center.notifications();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, id);
        assert_eq!(queue[0].auto_dismiss, Some(DEFAULT_AUTO_DISMISS));
        assert!(queue[0].dismissible);
        assert_eq!(queue[0].title, None);
    }

    #[tokio::test]
    async fn test_explicit_zero_duration_is_sticky() {
        let center = NotificationCenter::new();
        center.add(NotificationSpec::new(NotificationKind::Info, "pinned").sticky());

        assert_eq!(center.notifications()[0].auto_dismiss, None);
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_monotonic() {
        let center = NotificationCenter::new();
        let a = center.success("a");
        let b = center.error("b");
        let c = center.info("c");
        assert!(a.0 < b.0 && b.0 < c.0);
    }

    #[tokio::test]
    async fn test_shorthands_set_kind() {
        let center = NotificationCenter::new();
        center.success("s");
        center.error("e");
        center.warning("w");
        center.info("i");

        let kinds: Vec<NotificationKind> =
            center.notifications().iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NotificationKind::Success,
                NotificationKind::Error,
                NotificationKind::Warning,
                NotificationKind::Info,
            ]
        );
    }
}
