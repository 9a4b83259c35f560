//! Observer boundary for timer notifications.
//!
//! The engine holds an ordered list of observers and invokes each one
//! synchronously, in subscription order, for every notification. Delivery is
//! fire-and-forget; observers that need another thread marshal it themselves.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::events::Notification;

/// Subscriber interface for the ten timer notifications.
///
/// Every method defaults to a no-op so implementors override only the
/// callbacks they consume.
pub trait PomodoroObserver {
    fn work_started(&mut self) {}
    fn work_percent(&mut self, _percent: u8) {}
    fn work_time_left(&mut self, _remaining: Duration) {}
    fn work_complete(&mut self) {}
    fn rest_started(&mut self) {}
    fn rest_percent(&mut self, _percent: u8) {}
    fn rest_time_left(&mut self, _remaining: Duration) {}
    fn rest_complete(&mut self) {}
    fn paused(&mut self) {}
    fn resumed(&mut self) {}

    /// Route one notification to the matching callback.
    ///
    /// Observers that treat notifications uniformly (loggers, serializers)
    /// can override this instead of the individual methods.
    fn notify(&mut self, notification: &Notification) {
        match *notification {
            Notification::WorkStarted => self.work_started(),
            Notification::WorkPercent { percent } => self.work_percent(percent),
            Notification::WorkTimeLeft { remaining_ms } => {
                self.work_time_left(Duration::from_millis(remaining_ms))
            }
            Notification::WorkComplete => self.work_complete(),
            Notification::RestStarted => self.rest_started(),
            Notification::RestPercent { percent } => self.rest_percent(percent),
            Notification::RestTimeLeft { remaining_ms } => {
                self.rest_time_left(Duration::from_millis(remaining_ms))
            }
            Notification::RestComplete => self.rest_complete(),
            Notification::Paused => self.paused(),
            Notification::Resumed => self.resumed(),
        }
    }
}

/// An observer that records every notification it receives.
///
/// The log lives behind a shared handle: clone the recorder, subscribe the
/// clone, and read the log from the original. Used by the test suites and by
/// harnesses that assert on notification order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    log: Rc<RefCell<Vec<Notification>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far, in delivery order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.log.borrow().clone()
    }

    /// Drain the log, returning the recorded notifications.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

impl PomodoroObserver for Recorder {
    fn notify(&mut self, notification: &Notification) {
        self.log.borrow_mut().push(notification.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_keeps_delivery_order() {
        let recorder = Recorder::new();
        let mut subscribed = recorder.clone();

        subscribed.notify(&Notification::WorkStarted);
        subscribed.notify(&Notification::WorkPercent { percent: 50 });
        subscribed.notify(&Notification::Paused);

        assert_eq!(
            recorder.notifications(),
            vec![
                Notification::WorkStarted,
                Notification::WorkPercent { percent: 50 },
                Notification::Paused,
            ]
        );
    }

    #[test]
    fn take_drains_the_log() {
        let recorder = Recorder::new();
        let mut subscribed = recorder.clone();
        subscribed.notify(&Notification::Resumed);

        assert_eq!(recorder.take(), vec![Notification::Resumed]);
        assert!(recorder.notifications().is_empty());
    }

    #[test]
    fn default_callbacks_are_noops() {
        struct Silent;
        impl PomodoroObserver for Silent {}

        let mut silent = Silent;
        silent.notify(&Notification::WorkComplete);
        silent.notify(&Notification::RestTimeLeft { remaining_ms: 1000 });
    }
}
