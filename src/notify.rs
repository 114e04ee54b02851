use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

use crate::util::{Clock, elapsed_between};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(4_000);
pub const MAX_VISIBLE_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
    pub duration: Duration,
}

impl Notification {
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: None,
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Sink for user-visible notifications.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
    shown_at: Instant,
}

/// Toasts on screen, expired by the injected clock.
pub struct ToastQueue<C: Clock> {
    clock: C,
    toasts: Vec<Toast>,
    next_id: u64,
}

impl<C: Clock> ToastQueue<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            toasts: Vec::new(),
            next_id: 1,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    /// Drop every toast whose duration has run out.
    pub fn prune(&mut self) {
        let now = self.clock.now();
        self.toasts.retain(|toast| {
            elapsed_between(toast.shown_at, now) < toast.notification.duration
        });
    }

    /// The newest toasts, oldest first.
    pub fn visible(&self) -> &[Toast] {
        let skip = self.toasts.len().saturating_sub(MAX_VISIBLE_TOASTS);
        &self.toasts[skip..]
    }

    /// Time until the next toast expires.
    pub fn next_expiry_in(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.toasts
            .iter()
            .map(|toast| {
                toast
                    .notification
                    .duration
                    .saturating_sub(elapsed_between(toast.shown_at, now))
            })
            .min()
    }
}

impl<C: Clock> Notifier for ToastQueue<C> {
    fn notify(&mut self, notification: Notification) {
        match notification.kind {
            ToastKind::Error => error!("toast: {}", notification.title),
            ToastKind::Warning => warn!("toast: {}", notification.title),
            ToastKind::Success | ToastKind::Info => info!("toast: {}", notification.title),
        }
        let id = self.next_id;
        self.next_id += 1;
        debug!("toast: queued #{id} for {:?}", notification.duration);
        self.toasts.push(Toast {
            id,
            notification,
            shown_at: self.clock.now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::ManualClock;

    fn toast(title: &str) -> Notification {
        Notification::new(ToastKind::Info, title)
    }

    #[test]
    fn expires_after_duration() {
        let mut queue = ToastQueue::new(ManualClock::new());
        queue.notify(toast("short").duration(Duration::from_millis(1_000)));
        queue.notify(toast("default"));
        assert_eq!(queue.next_expiry_in(), Some(Duration::from_millis(1_000)));

        queue.clock().advance(Duration::from_millis(1_000));
        queue.prune();
        let titles: Vec<_> = queue.visible().iter().map(|t| t.notification.title.as_str()).collect();
        assert_eq!(titles, ["default"]);

        queue.clock().advance(DEFAULT_TOAST_DURATION);
        queue.prune();
        assert!(queue.visible().is_empty());
        assert_eq!(queue.next_expiry_in(), None);
    }

    #[test]
    fn shows_only_newest_five() {
        let mut queue = ToastQueue::new(ManualClock::new());
        for i in 0..7 {
            queue.notify(toast(&format!("t{i}")));
        }
        let titles: Vec<_> = queue.visible().iter().map(|t| t.notification.title.clone()).collect();
        assert_eq!(titles, ["t2", "t3", "t4", "t5", "t6"]);
    }

    #[test]
    fn dismiss_removes_by_id() {
        let mut queue = ToastQueue::new(ManualClock::new());
        queue.notify(toast("a"));
        queue.notify(toast("b"));
        let first = queue.visible()[0].id;
        queue.dismiss(first);
        assert_eq!(queue.visible().len(), 1);
        assert_eq!(queue.visible()[0].notification.title, "b");
    }
}
