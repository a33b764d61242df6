//! The shared coordinator behind the two bootstrap entry points.
//!
//! One `CookieManager` exists per process. It is built by the bootstrap,
//! held by a single owning root and handed explicitly to whatever needs it.

use tracing::{debug, info, warn};

use crate::deletion::DeletionService;
use crate::events::{EventBus, EventPublisher, OverlayEvent};
use crate::host::{HostUi, RetryScheduler};
use crate::model::{CookieRecord, DeletionResult, OverlayConfig};
use crate::overlay::{
    ActionReport, MenuAction, OverlayController, OverlayError, ResultMessage, ShowStatus,
};
use crate::storage::StorageAccessor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    /// Floating button shown at startup.
    Interactive,
    /// Button stays hidden until toggled.
    Silent,
}

pub struct CookieManager<H: HostUi, S: RetryScheduler, A: StorageAccessor> {
    overlay: OverlayController<H, S>,
    deletion: DeletionService<A>,
    bus: EventBus,
    started: Option<StartMode>,
}

impl<H: HostUi, S: RetryScheduler, A: StorageAccessor> CookieManager<H, S, A> {
    pub fn new(host: H, scheduler: S, storage: A, config: &OverlayConfig) -> Self {
        Self {
            overlay: OverlayController::new(host, scheduler, config),
            deletion: DeletionService::new(storage),
            bus: EventBus::new(),
            started: None,
        }
    }

    // === Bootstrap ===

    /// Start and show the floating button. Later init calls are no-ops.
    pub fn init_interactive(&mut self) -> Result<ShowStatus, OverlayError> {
        if let Some(mode) = self.started {
            debug!(?mode, "already initialized");
            return Ok(self.current_show_status());
        }
        self.started = Some(StartMode::Interactive);
        info!("cookie manager started (interactive)");
        self.overlay.show()
    }

    /// Start without showing anything. Later init calls are no-ops.
    pub fn init_silent(&mut self) {
        if let Some(mode) = self.started {
            debug!(?mode, "already initialized");
            return;
        }
        self.started = Some(StartMode::Silent);
        info!("cookie manager started (silent)");
    }

    pub fn start_mode(&self) -> Option<StartMode> {
        self.started
    }

    // === Floating button ===

    pub fn show_floating_button(&mut self) -> Result<ShowStatus, OverlayError> {
        self.overlay.show()
    }

    pub fn hide_floating_button(&mut self) {
        self.overlay.hide();
    }

    pub fn toggle_floating_button(&mut self) -> Result<bool, OverlayError> {
        self.overlay.toggle()
    }

    pub fn is_floating_button_visible(&self) -> bool {
        self.overlay.is_visible()
    }

    pub fn show_menu(&mut self) -> Result<(), OverlayError> {
        self.overlay.open_menu()
    }

    pub fn hide_menu(&mut self) {
        self.overlay.close_menu();
    }

    // === Storage ===

    pub fn delete_all_cookies(&mut self) -> DeletionResult {
        self.deletion.delete_all_cookies()
    }

    pub fn delete_cookies_for_domain(&mut self, domain: &str) -> DeletionResult {
        self.deletion.delete_cookies_for_domain(domain)
    }

    pub fn all_cookies(&self) -> Vec<CookieRecord> {
        self.deletion.all_cookies()
    }

    pub fn cookie_count(&self) -> usize {
        self.deletion.cookie_count()
    }

    pub fn delete_all_app_data(&mut self) -> DeletionResult {
        self.deletion.delete_all_app_data()
    }

    pub fn delete_app_caches(&mut self) -> DeletionResult {
        self.deletion.delete_app_caches()
    }

    pub fn delete_app_documents(&mut self) -> DeletionResult {
        self.deletion.delete_app_documents()
    }

    pub fn delete_app_preferences(&mut self) -> DeletionResult {
        self.deletion.delete_app_preferences()
    }

    pub fn app_data_size(&self) -> u64 {
        self.deletion.app_data_size()
    }

    // === Events ===

    pub fn publisher(&self) -> EventPublisher {
        self.bus.publisher()
    }

    /// Dispatch everything queued, including events published while
    /// dispatching. Returns how many events were handled.
    pub fn drain_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.bus.try_recv() {
            self.dispatch(event);
            handled += 1;
        }
        handled
    }

    pub fn dispatch(&mut self, event: OverlayEvent) {
        if !event.is_gesture() {
            debug!(event = event.description(), "dispatch");
        }
        match event {
            OverlayEvent::RetryElapsed(token) => {
                let outcome = self.overlay.on_retry_elapsed(token);
                self.log_show_outcome(outcome);
            }
            OverlayEvent::Tapped => {
                self.overlay.tap();
            }
            OverlayEvent::DragBegan => {
                self.overlay.drag_began();
            }
            OverlayEvent::DragMoved { translation } => self.overlay.drag_moved(translation),
            OverlayEvent::DragEnded { translation } => {
                self.overlay.drag_ended(translation);
            }
            OverlayEvent::MenuSelected(action) => {
                self.overlay.menu_closed();
                self.run_action(action);
            }
            OverlayEvent::MenuDismissed => self.overlay.menu_closed(),
            OverlayEvent::ToggleRequested => {
                if let Err(err) = self.overlay.toggle() {
                    warn!(error = %err, "toggle failed");
                }
            }
            OverlayEvent::HostWindowChanged => {
                let outcome = self.overlay.host_window_changed();
                self.log_show_outcome(outcome);
            }
        }
    }

    /// Run one menu entry and show its result. Returns the report, `None`
    /// for entries that produce no message.
    pub fn run_action(&mut self, action: MenuAction) -> Option<ActionReport> {
        let report = match &action {
            MenuAction::HideButton => {
                self.overlay.hide();
                return None;
            }
            MenuAction::ShowCookies => ActionReport::Cookies(self.deletion.all_cookies()),
            MenuAction::CookieCount => ActionReport::CookieCount(self.deletion.cookie_count()),
            MenuAction::DeleteAllCookies => ActionReport::Deleted(self.deletion.delete_all_cookies()),
            MenuAction::DeleteCookiesForDomain(domain) => {
                ActionReport::Deleted(self.deletion.delete_cookies_for_domain(domain))
            }
            MenuAction::AppDataSize => ActionReport::DataSize(self.deletion.app_data_size()),
            MenuAction::DeleteAppCaches => ActionReport::Deleted(self.deletion.delete_app_caches()),
            MenuAction::DeleteAppDocuments => {
                ActionReport::Deleted(self.deletion.delete_app_documents())
            }
            MenuAction::DeleteAppPreferences => {
                ActionReport::Deleted(self.deletion.delete_app_preferences())
            }
            MenuAction::DeleteAllAppData => ActionReport::Deleted(self.deletion.delete_all_app_data()),
        };
        let message = ResultMessage::describe(&action, &report);
        self.overlay.present_result(&message);
        Some(report)
    }

    pub fn overlay(&self) -> &OverlayController<H, S> {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut OverlayController<H, S> {
        &mut self.overlay
    }

    pub fn deletion(&self) -> &DeletionService<A> {
        &self.deletion
    }

    fn current_show_status(&self) -> ShowStatus {
        if self.overlay.is_visible() {
            ShowStatus::Visible
        } else {
            ShowStatus::Pending
        }
    }

    fn log_show_outcome(&self, outcome: Option<Result<ShowStatus, OverlayError>>) {
        match outcome {
            Some(Ok(ShowStatus::Visible)) => debug!("floating button visible"),
            Some(Ok(ShowStatus::Pending)) | None => {}
            Some(Err(err)) => warn!(error = %err, "floating button unavailable"),
        }
    }
}
