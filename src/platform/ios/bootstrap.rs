//! The owning root and the C entry points.
//!
//! The single [`CookieManager`] lives in a main-thread `thread_local`. UIKit
//! callbacks only publish events and call [`pump`], which borrows the root
//! and drains the queue.

use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};

use tracing::{error, info, warn};

use super::cookies::{StandardDefaults, SystemCookieStore};
use super::ffi::bridge::{get_class, id, is_main_thread, msg_send, RcBlock};
use super::host::UiKitHost;
use super::observers::install_window_observers;
use super::probe::probe;
use super::scheduler::RunLoopScheduler;
use crate::events;
use crate::logging;
use crate::manager::{CookieManager, StartMode};
use crate::model::OverlayConfig;
use crate::storage::{SandboxDirs, SandboxStorage};

type Storage = SandboxStorage<SystemCookieStore, StandardDefaults>;
type Root = CookieManager<UiKitHost, RunLoopScheduler, Storage>;

thread_local! {
    static ROOT: RefCell<Option<Root>> = const { RefCell::new(None) };
}

/// Initialise and show the floating button.
#[no_mangle]
pub extern "C" fn initCookieManager() {
    start(StartMode::Interactive);
}

/// Initialise without showing anything.
#[no_mangle]
pub extern "C" fn initCookieManagerSilent() {
    start(StartMode::Silent);
}

/// Dispatch every queued event. A call made while the root is already
/// borrowed (a callback fired from inside a dispatch) returns immediately;
/// the outer drain picks its event up.
pub fn pump() {
    let outcome = panic::catch_unwind(|| {
        let _ = ROOT.try_with(|root| {
            let Ok(mut root) = root.try_borrow_mut() else {
                return;
            };
            if let Some(manager) = root.as_mut() {
                manager.drain_events();
            }
        });
    });
    if outcome.is_err() {
        error!("panic while dispatching overlay events");
    }
}

fn start(mode: StartMode) {
    if !is_main_thread() {
        run_on_main(mode);
        return;
    }
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = ROOT.try_with(|root| {
            let Ok(mut root) = root.try_borrow_mut() else {
                warn!("initialisation re-entered, ignored");
                return;
            };
            if root.is_none() {
                *root = Some(build());
            }
            if let Some(manager) = root.as_mut() {
                match mode {
                    StartMode::Interactive => match manager.init_interactive() {
                        Ok(status) => info!(?status, "floating button requested"),
                        Err(err) => warn!(error = %err, "floating button unavailable"),
                    },
                    StartMode::Silent => manager.init_silent(),
                }
            }
        });
        pump();
    }));
    if outcome.is_err() {
        error!(?mode, "panic during initialisation");
    }
}

fn build() -> Root {
    logging::init();
    let config = OverlayConfig::from_env();
    let caps = probe();

    let dirs = SandboxDirs::discover().unwrap_or_else(|err| {
        // tmp/ sits directly inside the app container.
        warn!(error = %err, "home directory unknown, using the temp dir's parent");
        let tmp = std::env::temp_dir();
        SandboxDirs::from_home(tmp.parent().unwrap_or(&tmp))
    });
    let storage = SandboxStorage::with_defaults(SystemCookieStore::new(), StandardDefaults::new(), dirs);
    let host = UiKitHost::new(caps, config.tint);
    let manager = CookieManager::new(host, RunLoopScheduler::new(), storage, &config);

    if !events::install_publisher(manager.publisher()) {
        warn!("event publisher already installed");
    }
    unsafe { install_window_observers() };
    info!(
        max_attempts = config.retry.max_attempts,
        initial_delay_ms = config.retry.initial_delay.as_millis() as u64,
        "cookie manager built"
    );
    manager
}

/// Re-run `start` on the main queue.
fn run_on_main(mode: StartMode) {
    let Some(queue_cls) = get_class("NSOperationQueue") else {
        error!("NSOperationQueue missing, cannot reach the main thread");
        return;
    };
    let block = RcBlock::new(move || start(mode));
    unsafe {
        let queue: id = msg_send![queue_cls, mainQueue];
        if queue.is_null() {
            error!("no main operation queue");
            return;
        }
        let _: () = msg_send![queue, addOperationWithBlock: &*block];
    }
}
