//! Transient operator notifications.
//!
//! Toasts appended to a visible queue; each one self-dismisses after a
//! fixed display lifetime unless the operator closed it first. The
//! queue is bounded: under a burst of failures the oldest toast is
//! dropped instead of growing without limit.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::DashboardConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// One visible toast.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub created_at: NaiveDateTime,
}

/// Opaque handle for manual dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationHandle(Uuid);

/// Shared toast queue. Cloning hands out another handle to the same
/// queue; the expiry tasks hold one too.
#[derive(Clone)]
pub struct NotificationCenter {
    queue: Arc<Mutex<VecDeque<Notification>>>,
    ttl: Duration,
    cap: usize,
}

impl NotificationCenter {
    pub fn new(ttl: Duration, cap: usize) -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            ttl,
            cap,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.notification_ttl, config.notification_cap)
    }

    /// Appends a toast and schedules its expiry.
    ///
    /// Several toasts may be visible at once; there is no dedup. When
    /// the queue is full the oldest entry is dropped to make room.
    pub async fn notify(&self, message: impl Into<String>, severity: Severity) -> NotificationHandle {
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            created_at: chrono::Local::now().naive_local(),
        };
        let handle = NotificationHandle(notification.id);

        {
            let mut queue = self.queue.lock().await;
            if queue.len() == self.cap {
                if let Some(dropped) = queue.pop_front() {
                    tracing::debug!(message = %dropped.message, "notification queue full, dropping oldest");
                }
            }
            queue.push_back(notification);
        }

        let center = self.clone();
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            center.dismiss(handle).await;
        });

        handle
    }

    /// Removes a toast if still visible. Returns whether anything was
    /// removed; dismissing twice (operator close racing the timer) is
    /// a no-op, not an error.
    pub async fn dismiss(&self, handle: NotificationHandle) -> bool {
        let mut queue = self.queue.lock().await;
        let before = queue.len();
        queue.retain(|n| n.id != handle.0);
        queue.len() != before
    }

    /// Snapshot of the visible queue, oldest first.
    pub async fn visible(&self) -> Vec<Notification> {
        self.queue.lock().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.queue.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.queue.lock().await.is_empty()
    }
}
