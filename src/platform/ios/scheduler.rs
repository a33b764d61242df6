//! [`RetryScheduler`] over one-shot run-loop timers.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use super::bootstrap::pump;
use super::ffi::bridge::{get_class, id, msg_send, AnyObject, Bool, RcBlock, Retained, NO};
use crate::attach::RetryToken;
use crate::events::{self, OverlayEvent};
use crate::host::{HostError, RetryScheduler};

/// Each token is an `NSTimer` on the main run loop whose block publishes
/// `RetryElapsed(token)` and pumps the facade.
#[derive(Default)]
pub struct RunLoopScheduler {
    timers: HashMap<RetryToken, Retained<AnyObject>>,
}

impl RunLoopScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget timers that already fired.
    fn prune(&mut self) {
        self.timers.retain(|_, timer| unsafe {
            let valid: Bool = msg_send![&**timer, isValid];
            valid.as_bool()
        });
    }
}

impl RetryScheduler for RunLoopScheduler {
    fn schedule(&mut self, token: RetryToken, delay: Duration) -> Result<(), HostError> {
        self.prune();
        let timer_class = get_class("NSTimer")
            .ok_or_else(|| HostError::TimerUnavailable("NSTimer class missing".into()))?;
        let block = RcBlock::new(move |_timer: id| {
            events::publish(OverlayEvent::RetryElapsed(token));
            pump();
        });
        unsafe {
            let timer: id = msg_send![
                timer_class,
                scheduledTimerWithTimeInterval: delay.as_secs_f64(),
                repeats: NO,
                block: &*block
            ];
            let timer = Retained::retain(timer)
                .ok_or_else(|| HostError::TimerUnavailable("NSTimer returned nil".into()))?;
            self.timers.insert(token, timer);
        }
        Ok(())
    }

    fn cancel(&mut self, token: RetryToken) {
        if let Some(timer) = self.timers.remove(&token) {
            debug!(token = token.0, "invalidating retry timer");
            unsafe {
                let _: () = msg_send![&*timer, invalidate];
            }
        }
    }
}

impl Drop for RunLoopScheduler {
    fn drop(&mut self) {
        for (_, timer) in self.timers.drain() {
            unsafe {
                let _: () = msg_send![&*timer, invalidate];
            }
        }
    }
}
