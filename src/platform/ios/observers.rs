//! Notification observers that tell the overlay the host's windows changed.

use tracing::debug;

use super::bootstrap::pump;
use super::ffi::bridge::{get_class, id, msg_send, nil, nsstring, RcBlock};
use crate::events::{self, OverlayEvent};

/// Window/scene notifications that can make a different window the right
/// host (or make one appear after a give-up).
const WINDOW_NOTIFICATIONS: [&str; 3] = [
    "UIWindowDidBecomeKeyNotification",
    "UIWindowDidBecomeVisibleNotification",
    "UISceneDidActivateNotification",
];

/// Install the observers on the main queue. They stay registered for the
/// life of the process.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn install_window_observers() {
    let Some(center_cls) = get_class("NSNotificationCenter") else {
        return;
    };
    let center: id = msg_send![center_cls, defaultCenter];
    if center.is_null() {
        return;
    }
    let queue: id = match get_class("NSOperationQueue") {
        Some(cls) => msg_send![cls, mainQueue],
        None => nil,
    };

    for name in WINDOW_NOTIFICATIONS {
        let block = RcBlock::new(move |_note: id| {
            events::publish(OverlayEvent::HostWindowChanged);
            pump();
        });
        let ns_name = nsstring(name);
        let token: id = msg_send![
            center,
            addObserverForName: &*ns_name,
            object: nil,
            queue: queue,
            usingBlock: &*block
        ];
        debug!(notification = name, installed = !token.is_null(), "window observer");
    }
}
