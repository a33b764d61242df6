//! Effect runner around [`AttachMachine`].
//!
//! The engine owns the host UI and the retry scheduler, executes the effects
//! the machine asks for and feeds the results back as events. It keeps only a
//! borrowed handle to the attached window and re-checks it before use.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use super::state::{AttachEvent, AttachMachine, AttachState, AttachStatus, Effect, RetryPolicy, RetryState, RetryToken};
use crate::host::{select_window, HostUi, RetryScheduler};
use crate::model::constants::INITIAL_VERTICAL_FRACTION;
use crate::model::geometry::{clamp_into, initial_frame};
use crate::model::{Point, Rect, Size};

pub struct AttachmentEngine<H: HostUi, S: RetryScheduler> {
    host: H,
    scheduler: S,
    machine: AttachMachine,
    target: Option<H::Window>,
    frame: Option<Rect>,
    /// Last resting origin, reused when attaching again.
    anchor: Option<Point>,
    button: Size,
    edge_margin: f64,
}

impl<H: HostUi, S: RetryScheduler> AttachmentEngine<H, S> {
    pub fn new(host: H, scheduler: S, button: Size, edge_margin: f64) -> Self {
        Self {
            host,
            scheduler,
            machine: AttachMachine::new(),
            target: None,
            frame: None,
            anchor: None,
            button,
            edge_margin,
        }
    }

    /// Start (or confirm) attachment. A no-op when already attached to a live
    /// window; restarts the search after a previous give-up.
    pub fn attach(&mut self, mut policy: RetryPolicy) -> AttachStatus {
        policy.validate();
        if self.revalidate() == AttachStatus::Attached {
            return AttachStatus::Attached;
        }
        self.apply(AttachEvent::Requested(policy));
        self.status()
    }

    /// Called when the scheduler delivers `token`.
    pub fn on_retry_elapsed(&mut self, token: RetryToken) -> AttachStatus {
        if self.machine.pending_retry() != Some(token) {
            debug!(token = token.0, "ignoring stale retry");
            return self.status();
        }
        self.apply(AttachEvent::RetryElapsed(token));
        self.status()
    }

    /// Tear down from any state. Cancels a pending retry.
    pub fn detach(&mut self) {
        self.apply(AttachEvent::DetachRequested);
    }

    /// Re-check the attached window; a dead or detached one restarts the
    /// search with the last policy.
    pub fn revalidate(&mut self) -> AttachStatus {
        if matches!(self.machine.state(), AttachState::Attached { .. }) && !self.target_is_live() {
            info!("attached window is gone, searching again");
            self.apply(AttachEvent::TargetLost);
        }
        self.status()
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.machine.state(), AttachState::Attached { .. })
    }

    pub fn status(&self) -> AttachStatus {
        self.machine.status()
    }

    pub fn state(&self) -> &AttachState {
        self.machine.state()
    }

    pub fn retry_state(&self) -> Option<&RetryState> {
        self.machine.retry_state()
    }

    /// Bounds of the attached window, if it is still alive.
    pub fn target_bounds(&self) -> Option<Rect> {
        self.target.as_ref().and_then(|w| self.host.bounds(w))
    }

    pub fn overlay_frame(&self) -> Option<Rect> {
        self.frame
    }

    pub fn button_size(&self) -> Size {
        self.button
    }

    pub fn edge_margin(&self) -> f64 {
        self.edge_margin
    }

    /// Move the installed overlay. Ignored while detached.
    pub fn move_overlay(&mut self, frame: Rect) {
        if self.frame.is_none() {
            return;
        }
        self.host.move_overlay(frame);
        self.frame = Some(frame);
    }

    /// Remember where the button came to rest.
    pub fn set_anchor(&mut self, origin: Point) {
        self.anchor = Some(origin);
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn target_is_live(&self) -> bool {
        self.target.as_ref().is_some_and(|w| self.host.is_live(w))
    }

    fn apply(&mut self, event: AttachEvent) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            debug!(?event, "attach event");
            for effect in self.machine.handle(event) {
                match effect {
                    Effect::Attempt => {
                        let attached = self.attempt();
                        queue.push_back(AttachEvent::AttemptFinished { attached });
                    }
                    Effect::ScheduleRetry { token, delay } => {
                        debug!(
                            token = token.0,
                            delay_ms = delay.as_millis() as u64,
                            attempts = self.retry_state().map_or(0, |r| r.attempt_count),
                            "no usable window yet, retry scheduled"
                        );
                        if let Err(err) = self.scheduler.schedule(token, delay) {
                            warn!(token = token.0, error = %err, "retry could not be scheduled");
                            queue.push_back(AttachEvent::RetryUnavailable(token));
                        }
                    }
                    Effect::CancelRetry(token) => {
                        debug!(token = token.0, "retry cancelled");
                        self.scheduler.cancel(token);
                    }
                    Effect::RemoveOverlay => {
                        self.host.remove_overlay();
                        self.target = None;
                        self.frame = None;
                    }
                    Effect::ReportGaveUp { attempts } => {
                        warn!(attempts, "no usable host window, giving up");
                    }
                }
            }
        }
    }

    /// One search: pick a window and install the overlay on it.
    fn attempt(&mut self) -> bool {
        let Some(candidate) = select_window(self.host.windows()) else {
            return false;
        };
        let bounds = self
            .host
            .bounds(&candidate.handle)
            .filter(|b| !b.is_empty())
            .unwrap_or(candidate.frame);
        let frame = self.placement(bounds);

        match self.host.install_overlay(&candidate.handle, frame) {
            Ok(()) => {
                info!(x = frame.origin.x, y = frame.origin.y, "overlay attached");
                self.target = Some(candidate.handle);
                self.frame = Some(frame);
                true
            }
            Err(err) => {
                warn!(error = %err, "overlay install failed");
                false
            }
        }
    }

    fn placement(&self, bounds: Rect) -> Rect {
        match self.anchor {
            Some(origin) => clamp_into(
                Rect::from_parts(origin, self.button),
                bounds,
                self.edge_margin,
            ),
            None => initial_frame(bounds, self.button, self.edge_margin, INITIAL_VERTICAL_FRACTION),
        }
    }
}
