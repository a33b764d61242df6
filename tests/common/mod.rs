//! In-memory host and scheduler shared by the integration tests.
#![allow(dead_code)]

use std::cell::Cell;
use std::time::Duration;

use cookie_manager::host::{HostError, HostUi, RetryScheduler, WindowCandidate};
use cookie_manager::model::Rect;
use cookie_manager::overlay::{MenuAction, ResultMessage};
use cookie_manager::RetryToken;

pub const PHONE: Rect = Rect::new(0.0, 0.0, 390.0, 844.0);

#[derive(Debug, Clone)]
pub struct FakeWindow {
    pub id: u32,
    pub is_key: bool,
    pub is_hidden: bool,
    pub frame: Rect,
    pub live: bool,
}

impl FakeWindow {
    pub fn key(id: u32) -> Self {
        Self {
            id,
            is_key: true,
            is_hidden: false,
            frame: PHONE,
            live: true,
        }
    }
}

/// Host whose window list can be scripted per search.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub windows: Vec<FakeWindow>,
    /// Windows are reported only from this search on (1-based).
    pub windows_from_search: u32,
    pub searches: Cell<u32>,
    pub fail_install: bool,

    pub installed_on: Option<u32>,
    pub overlay_frame: Option<Rect>,
    pub overlay_visible: bool,
    pub installs: u32,
    pub removals: u32,

    pub menus: Vec<Vec<MenuAction>>,
    pub menu_showing: bool,
    pub menu_dismissals: u32,
    pub messages: Vec<ResultMessage>,
}

impl FakeHost {
    /// One key window, available from the first search.
    pub fn with_window() -> Self {
        Self {
            windows: vec![FakeWindow::key(1)],
            ..Self::default()
        }
    }

    /// One key window that shows up only at search `n`.
    pub fn window_appearing_at(n: u32) -> Self {
        Self {
            windows_from_search: n,
            ..Self::with_window()
        }
    }

    pub fn without_windows() -> Self {
        Self::default()
    }

    pub fn kill_window(&mut self, id: u32) {
        if let Some(w) = self.windows.iter_mut().find(|w| w.id == id) {
            w.live = false;
        }
    }

    fn window(&self, id: u32) -> Option<&FakeWindow> {
        self.windows.iter().find(|w| w.id == id && w.live)
    }
}

impl HostUi for FakeHost {
    type Window = u32;

    fn windows(&self) -> Vec<WindowCandidate<u32>> {
        let search = self.searches.get() + 1;
        self.searches.set(search);
        if search < self.windows_from_search {
            return Vec::new();
        }
        self.windows
            .iter()
            .filter(|w| w.live)
            .map(|w| WindowCandidate {
                handle: w.id,
                is_key: w.is_key,
                is_hidden: w.is_hidden,
                frame: w.frame,
            })
            .collect()
    }

    fn is_live(&self, window: &u32) -> bool {
        self.window(*window).is_some()
    }

    fn bounds(&self, window: &u32) -> Option<Rect> {
        self.window(*window).map(|w| w.frame)
    }

    fn install_overlay(&mut self, window: &u32, frame: Rect) -> Result<(), HostError> {
        if self.fail_install {
            return Err(HostError::InstallFailed("scripted failure".into()));
        }
        if self.window(*window).is_none() {
            return Err(HostError::WindowGone);
        }
        self.installed_on = Some(*window);
        self.overlay_frame = Some(frame);
        self.overlay_visible = false;
        self.installs += 1;
        Ok(())
    }

    fn remove_overlay(&mut self) {
        if self.installed_on.take().is_some() {
            self.removals += 1;
        }
        self.overlay_frame = None;
        self.overlay_visible = false;
        self.menu_showing = false;
    }

    fn set_overlay_visible(&mut self, visible: bool) {
        if self.installed_on.is_some() {
            self.overlay_visible = visible;
        }
    }

    fn move_overlay(&mut self, frame: Rect) {
        if self.installed_on.is_some() {
            self.overlay_frame = Some(frame);
        }
    }

    fn present_menu(&mut self, entries: &[MenuAction]) {
        self.menus.push(entries.to_vec());
        self.menu_showing = true;
    }

    fn dismiss_menu(&mut self) {
        self.menu_showing = false;
        self.menu_dismissals += 1;
    }

    fn present_message(&mut self, message: &ResultMessage) {
        self.messages.push(message.clone());
    }
}

/// Records schedule/cancel calls; tests fire tokens by hand.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pub scheduled: Vec<(RetryToken, Duration)>,
    pub cancelled: Vec<RetryToken>,
    /// Refuse every schedule call, like a host without a timer source.
    pub unavailable: bool,
}

impl ManualScheduler {
    pub fn last_token(&self) -> Option<RetryToken> {
        self.scheduled.last().map(|(token, _)| *token)
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.scheduled.iter().map(|(_, d)| *d).collect()
    }
}

impl RetryScheduler for ManualScheduler {
    fn schedule(&mut self, token: RetryToken, delay: Duration) -> Result<(), HostError> {
        if self.unavailable {
            return Err(HostError::TimerUnavailable("scripted failure".into()));
        }
        self.scheduled.push((token, delay));
        Ok(())
    }

    fn cancel(&mut self, token: RetryToken) {
        self.cancelled.push(token);
    }
}
