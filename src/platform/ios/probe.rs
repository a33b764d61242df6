//! Reads the OS version and device idiom from `UIDevice`.

use tracing::{info, warn};

use super::ffi::bridge::{get_class, id, msg_send, string_from_ns};
use crate::capabilities::{Capabilities, DeviceIdiom, OsVersion};

// UIUserInterfaceIdiom
const IDIOM_PHONE: isize = 0;
const IDIOM_PAD: isize = 1;

/// Probe once at bootstrap. An unreadable version is treated as the oldest
/// supported release.
pub fn probe() -> Capabilities {
    let (version, idiom) = unsafe { read_device() };
    let os = version.as_deref().and_then(OsVersion::parse).unwrap_or_else(|| {
        warn!(raw = ?version, "unreadable systemVersion");
        OsVersion::new(11, 0, 0)
    });
    let caps = Capabilities::probe(os, idiom);
    info!(
        os = %caps.os,
        ?idiom,
        window_lookup = ?caps.window_lookup,
        menu_style = ?caps.menu_style,
        "capabilities probed"
    );
    caps
}

unsafe fn read_device() -> (Option<String>, DeviceIdiom) {
    let Some(cls) = get_class("UIDevice") else {
        return (None, DeviceIdiom::Other);
    };
    let device: id = msg_send![cls, currentDevice];
    if device.is_null() {
        return (None, DeviceIdiom::Other);
    }
    let version = string_from_ns(msg_send![device, systemVersion]);
    let raw_idiom: isize = msg_send![device, userInterfaceIdiom];
    let idiom = match raw_idiom {
        IDIOM_PHONE => DeviceIdiom::Phone,
        IDIOM_PAD => DeviceIdiom::Pad,
        _ => DeviceIdiom::Other,
    };
    (version, idiom)
}
