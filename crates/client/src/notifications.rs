//! Bounded queue of transient user-facing messages.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

pub const MAX_NOTIFICATIONS: usize = 3;
pub const DEFAULT_DURATION_MS: u64 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub duration_ms: u64,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn expires_at(&self) -> DateTime<Utc> {
        let millis = i64::from(u32::try_from(self.duration_ms).unwrap_or(u32::MAX));
        self.created_at
            .checked_add_signed(Duration::milliseconds(millis))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

/// Shared handle; only the newest [`MAX_NOTIFICATIONS`] are kept.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    queue: Arc<Mutex<VecDeque<Notification>>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        duration_ms: Option<u64>,
    ) -> Uuid {
        self.push_at(kind, message, duration_ms, Utc::now())
    }

    pub fn push_at(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        duration_ms: Option<u64>,
        now: DateTime<Utc>,
    ) -> Uuid {
        let notification = Notification {
            id: Uuid::now_v7(),
            kind,
            message: message.into(),
            duration_ms: duration_ms.unwrap_or(DEFAULT_DURATION_MS),
            created_at: now,
        };
        let id = notification.id;

        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.push_back(notification);
        while queue.len() > MAX_NOTIFICATIONS {
            queue.pop_front();
        }
        id
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.push(NotificationKind::Success, message, None)
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.push(NotificationKind::Error, message, None)
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.push(NotificationKind::Info, message, None)
    }

    pub fn warning(&self, message: impl Into<String>) -> Uuid {
        self.push(NotificationKind::Warning, message, None)
    }

    /// Unexpired notifications, oldest first.
    pub fn active(&self, now: DateTime<Utc>) -> Vec<Notification> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|n| !n.is_expired(now))
            .cloned()
            .collect()
    }

    /// Drop expired notifications; returns how many were removed.
    pub fn prune(&self, now: DateTime<Utc>) -> usize {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        let before = queue.len();
        queue.retain(|n| !n.is_expired(now));
        before - queue.len()
    }

    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        let before = queue.len();
        queue.retain(|n| n.id != id);
        queue.len() != before
    }

    pub fn len(&self) -> usize {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest_three() {
        let notifications = Notifications::new();
        for i in 0..5 {
            notifications.info(format!("message {i}"));
        }
        let messages: Vec<String> = notifications
            .active(Utc::now())
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(messages, vec!["message 2", "message 3", "message 4"]);
    }

    #[test]
    fn prune_removes_expired() {
        let notifications = Notifications::new();
        let t0 = Utc::now();
        notifications.push_at(NotificationKind::Error, "short", Some(1_000), t0);
        notifications.push_at(NotificationKind::Success, "default", None, t0);

        let later = t0 + Duration::milliseconds(1_500);
        assert_eq!(notifications.active(later).len(), 1);
        assert_eq!(notifications.prune(later), 1);
        assert_eq!(notifications.len(), 1);

        assert_eq!(notifications.prune(t0 + Duration::milliseconds(3_000)), 1);
        assert!(notifications.is_empty());
    }

    #[test]
    fn dismiss_by_id() {
        let notifications = Notifications::new();
        let id = notifications.warning("careful");
        notifications.success("done");
        assert!(notifications.dismiss(id));
        assert!(!notifications.dismiss(id));
        assert_eq!(notifications.active(Utc::now())[0].kind, NotificationKind::Success);
    }
}
