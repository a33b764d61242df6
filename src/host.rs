//! Seams to the host application's UI and event loop.
//!
//! The core never touches UIKit directly: it talks to a [`HostUi`] for
//! windows, views and menus and to a [`RetryScheduler`] for timers. The iOS
//! implementations live in `platform::ios`; tests use in-memory fakes.

use std::time::Duration;

use crate::attach::RetryToken;
use crate::model::Rect;
use crate::overlay::{MenuAction, ResultMessage};

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("window has no view to host the overlay")]
    NoRootView,

    #[error("window went away before the overlay was installed")]
    WindowGone,

    #[error("overlay install failed: {0}")]
    InstallFailed(String),

    #[error("retry timer unavailable: {0}")]
    TimerUnavailable(String),
}

/// One entry of the host's current window list.
///
/// `handle` is a non-owning reference: holding it must never keep the host
/// window alive.
#[derive(Debug, Clone)]
pub struct WindowCandidate<W> {
    pub handle: W,
    pub is_key: bool,
    pub is_hidden: bool,
    pub frame: Rect,
}

impl<W> WindowCandidate<W> {
    /// Key or visible, and with an actual area.
    pub fn is_usable(&self) -> bool {
        (self.is_key || !self.is_hidden) && !self.frame.is_empty()
    }
}

/// First usable window in host order.
pub fn select_window<W>(candidates: Vec<WindowCandidate<W>>) -> Option<WindowCandidate<W>> {
    candidates.into_iter().find(WindowCandidate::is_usable)
}

/// Everything the overlay needs from the host UI.
///
/// All methods are called on the UI thread.
pub trait HostUi {
    /// Borrowed handle to a host window.
    type Window;

    /// Snapshot of the host's windows, frontmost scene first.
    fn windows(&self) -> Vec<WindowCandidate<Self::Window>>;

    /// Whether the window still exists and is still part of the app.
    fn is_live(&self, window: &Self::Window) -> bool;

    /// Current bounds of the window, `None` once it is gone.
    fn bounds(&self, window: &Self::Window) -> Option<Rect>;

    /// Add the overlay view and its tap/pan recognizers to `window`.
    fn install_overlay(&mut self, window: &Self::Window, frame: Rect) -> Result<(), HostError>;

    /// Remove the overlay view and its recognizers. Safe when nothing is
    /// installed.
    fn remove_overlay(&mut self);

    fn set_overlay_visible(&mut self, visible: bool);

    fn move_overlay(&mut self, frame: Rect);

    /// Show the action menu. The selection comes back as an
    /// `OverlayEvent::MenuSelected`.
    fn present_menu(&mut self, entries: &[MenuAction]);

    fn dismiss_menu(&mut self);

    fn present_message(&mut self, message: &ResultMessage);
}

/// Cooperative timer source (the host's run loop).
///
/// A scheduled token is later delivered back as
/// `OverlayEvent::RetryElapsed(token)`; it must never block.
pub trait RetryScheduler {
    /// An `Err` means the token will never fire.
    fn schedule(&mut self, token: RetryToken, delay: Duration) -> Result<(), HostError>;

    /// Cancel a scheduled token. Unknown tokens are ignored.
    fn cancel(&mut self, token: RetryToken);
}
