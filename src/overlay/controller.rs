//! Floating button presentation on top of the attachment engine.
//!
//! The controller owns the process' single [`OverlayVisualState`] and turns
//! gestures into engine calls, host menu presentation and frame updates.

use tracing::{debug, info};

use super::menu::{MenuAction, ResultMessage};
use crate::attach::{AttachStatus, AttachmentEngine, RetryPolicy, RetryToken};
use crate::host::{HostUi, RetryScheduler};
use crate::model::geometry::{clamp_into, snap_to_side};
use crate::model::{OverlayConfig, Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayVisualState {
    /// Nothing installed (initial, while searching, after a give-up).
    Detached,
    /// Installed on a window, not revealed yet.
    Attached,
    Visible,
    /// Explicitly hidden by the user or the API.
    Hidden,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowStatus {
    Visible,
    /// Waiting for the host window; revealed by a later retry.
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    #[error("no usable host window after {attempts} attempt(s)")]
    AttachmentFailed { attempts: u32 },

    #[error("overlay is not attached to a window")]
    NotAttached,
}

pub struct OverlayController<H: HostUi, S: RetryScheduler> {
    engine: AttachmentEngine<H, S>,
    visual: OverlayVisualState,
    policy: RetryPolicy,
    snap_to_edge: bool,
    /// A show is requested (visible now or waiting for a window).
    wants_visible: bool,
    /// The last show gave up; try again when the host's windows change.
    retry_on_window_change: bool,
    drag_origin: Option<Point>,
    menu_open: bool,
}

impl<H: HostUi, S: RetryScheduler> OverlayController<H, S> {
    pub fn new(host: H, scheduler: S, config: &OverlayConfig) -> Self {
        Self {
            engine: AttachmentEngine::new(host, scheduler, config.button(), config.edge_margin),
            visual: OverlayVisualState::Detached,
            policy: config.retry,
            snap_to_edge: config.snap_to_edge,
            wants_visible: false,
            retry_on_window_change: false,
            drag_origin: None,
            menu_open: false,
        }
    }

    /// Attach (if needed) and reveal the button.
    pub fn show(&mut self) -> Result<ShowStatus, OverlayError> {
        self.wants_visible = true;
        self.retry_on_window_change = false;
        let status = self.engine.attach(self.policy);
        self.settle(status).unwrap_or(Ok(ShowStatus::Pending))
    }

    /// Hide and detach. Idempotent.
    pub fn hide(&mut self) {
        self.wants_visible = false;
        self.retry_on_window_change = false;
        self.drag_origin = None;
        self.close_menu();
        self.engine.detach();
        if self.visual != OverlayVisualState::Hidden {
            debug!("overlay hidden");
        }
        self.visual = OverlayVisualState::Hidden;
    }

    /// Flip visibility. Returns whether the button is visible afterwards.
    pub fn toggle(&mut self) -> Result<bool, OverlayError> {
        if self.wants_visible {
            self.hide();
            Ok(false)
        } else {
            self.show().map(|status| status == ShowStatus::Visible)
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(
            self.visual,
            OverlayVisualState::Visible | OverlayVisualState::Dragging
        )
    }

    pub fn visual_state(&self) -> OverlayVisualState {
        self.visual
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Delivery of a scheduled retry. Returns the outcome of a pending show
    /// once it is decided.
    pub fn on_retry_elapsed(&mut self, token: RetryToken) -> Option<Result<ShowStatus, OverlayError>> {
        let status = self.engine.on_retry_elapsed(token);
        self.settle(status)
    }

    /// The host's key window or active scene changed.
    pub fn host_window_changed(&mut self) -> Option<Result<ShowStatus, OverlayError>> {
        if self.engine.is_attached() {
            let status = self.engine.revalidate();
            return self.settle(status);
        }
        if self.retry_on_window_change {
            info!("host windows changed, retrying overlay attachment");
            return Some(self.show());
        }
        None
    }

    pub fn drag_began(&mut self) -> bool {
        if !self.is_visible() || self.drag_origin.is_some() {
            return false;
        }
        if !self.ensure_attached() {
            return false;
        }
        let Some(frame) = self.engine.overlay_frame() else {
            return false;
        };
        self.close_menu();
        self.drag_origin = Some(frame.origin);
        self.visual = OverlayVisualState::Dragging;
        true
    }

    /// Follow the finger. `translation` is cumulative since the drag began.
    pub fn drag_moved(&mut self, translation: Point) {
        let (Some(origin), Some(frame)) = (self.drag_origin, self.engine.overlay_frame()) else {
            return;
        };
        self.engine.move_overlay(frame.with_origin(origin.offset(translation)));
    }

    /// Finish a drag (or a cancelled one) and settle the button inside the
    /// window bounds. Returns the resting frame.
    pub fn drag_ended(&mut self, translation: Point) -> Option<Rect> {
        let origin = self.drag_origin.take()?;
        if self.visual == OverlayVisualState::Dragging {
            self.visual = OverlayVisualState::Visible;
        }
        let (Some(frame), Some(bounds)) = (self.engine.overlay_frame(), self.engine.target_bounds())
        else {
            self.ensure_attached();
            return None;
        };

        let margin = self.engine.edge_margin();
        let mut rest = clamp_into(frame.with_origin(origin.offset(translation)), bounds, margin);
        if self.snap_to_edge {
            rest = snap_to_side(rest, bounds, margin);
        }
        self.engine.move_overlay(rest);
        self.engine.set_anchor(rest.origin);
        debug!(x = rest.origin.x, y = rest.origin.y, "overlay came to rest");
        Some(rest)
    }

    /// A tap on the button. Opens the menu unless a drag is in progress.
    pub fn tap(&mut self) -> bool {
        if self.visual == OverlayVisualState::Dragging {
            return false;
        }
        self.open_menu().is_ok()
    }

    pub fn open_menu(&mut self) -> Result<(), OverlayError> {
        if !self.is_visible() || !self.ensure_attached() {
            return Err(OverlayError::NotAttached);
        }
        self.engine.host_mut().present_menu(&MenuAction::entries());
        self.menu_open = true;
        Ok(())
    }

    pub fn close_menu(&mut self) {
        if self.menu_open {
            self.engine.host_mut().dismiss_menu();
            self.menu_open = false;
        }
    }

    /// The host reported a selection or a dismissal; the menu is gone.
    pub fn menu_closed(&mut self) {
        self.menu_open = false;
    }

    pub fn present_result(&mut self, message: &ResultMessage) {
        self.engine.host_mut().present_message(message);
    }

    pub fn engine(&self) -> &AttachmentEngine<H, S> {
        &self.engine
    }

    pub fn host(&self) -> &H {
        self.engine.host()
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.engine.host_mut()
    }

    /// Revalidate before an interaction; false when the window went away.
    fn ensure_attached(&mut self) -> bool {
        let status = self.engine.revalidate();
        self.settle(status);
        status == AttachStatus::Attached
    }

    /// Bring the visual state in line with the engine.
    fn settle(&mut self, status: AttachStatus) -> Option<Result<ShowStatus, OverlayError>> {
        match status {
            AttachStatus::Attached => {
                if !self.wants_visible {
                    return None;
                }
                if !self.is_visible() {
                    self.visual = OverlayVisualState::Attached;
                }
                // Idempotent; a re-attachment installs a fresh, hidden view.
                self.engine.host_mut().set_overlay_visible(true);
                if self.visual == OverlayVisualState::Attached {
                    self.visual = OverlayVisualState::Visible;
                    info!("overlay visible");
                }
                Some(Ok(ShowStatus::Visible))
            }
            AttachStatus::GaveUp { attempts } => {
                if !self.wants_visible {
                    return None;
                }
                self.wants_visible = false;
                self.retry_on_window_change = true;
                self.visual = OverlayVisualState::Detached;
                Some(Err(OverlayError::AttachmentFailed { attempts }))
            }
            AttachStatus::Searching { .. } | AttachStatus::Idle => {
                if self.visual != OverlayVisualState::Hidden {
                    self.visual = OverlayVisualState::Detached;
                }
                self.drag_origin = None;
                self.menu_open = false;
                None
            }
        }
    }
}
