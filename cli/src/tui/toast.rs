use std::time::{Duration, Instant};

use todomaster_core::{Notice, Notifier};

#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub expires_at: Instant,
}

impl Toast {
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Shows the most recent notice until it expires.
#[derive(Debug, Clone)]
pub struct ToastSink {
    current: Option<Toast>,
    duration: Duration,
}

impl ToastSink {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Drop the toast once it has expired. Called on every tick.
    pub fn update(&mut self) {
        if self.current.as_ref().is_some_and(Toast::is_expired) {
            self.current = None;
        }
    }
}

impl Notifier for ToastSink {
    fn notify(&mut self, notice: Notice) {
        let now = Instant::now();
        self.current = Some(Toast {
            notice,
            expires_at: now.checked_add(self.duration).unwrap_or(now),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_notice_wins() {
        let mut sink = ToastSink::new(Duration::from_secs(60));
        sink.notify(Notice::success("first"));
        sink.notify(Notice::error("second"));
        sink.update();
        assert_eq!(sink.current().unwrap().notice, Notice::error("second"));
    }

    #[test]
    fn test_expired_toast_is_cleared() {
        let mut sink = ToastSink::new(Duration::ZERO);
        sink.notify(Notice::success("gone"));
        sink.update();
        assert!(sink.current().is_none());
    }

    #[test]
    fn test_huge_duration_does_not_overflow() {
        let mut sink = ToastSink::new(Duration::MAX);
        sink.notify(Notice::success("saved"));
        assert_eq!(sink.current().unwrap().notice, Notice::success("saved"));
    }
}
