//! Action menu, domain prompt and result messages via `UIAlertController`.
//!
//! Selections are published as [`OverlayEvent`]s from the action handlers;
//! nothing here touches the facade directly.

use tracing::{debug, warn};

use super::bootstrap::pump;
use super::ffi::bridge::{
    array_items, get_class, id, msg_send, nil, nsstring, string_from_ns, weak_ref, CGRect, RcBlock,
    Retained, NO, YES,
};
use crate::capabilities::MenuStyle;
use crate::events::{self, OverlayEvent};
use crate::overlay::{MenuAction, ResultMessage};

const MENU_TITLE: &str = "Cookie Manager";
const DOMAIN_PLACEHOLDER: &str = "example.com";

// UIAlertActionStyle
const ACTION_DEFAULT: isize = 0;
const ACTION_CANCEL: isize = 1;
const ACTION_DESTRUCTIVE: isize = 2;

// UIAlertControllerStyleAlert
const STYLE_ALERT: isize = 1;

// UIKeyboardTypeURL, UITextAutocapitalizationTypeNone, UITextAutocorrectionTypeNo
const KEYBOARD_URL: isize = 3;
const AUTOCAPITALIZE_NONE: isize = 0;
const AUTOCORRECT_NO: isize = 1;

/// Topmost view controller presented from `window`'s root. `nil` when the
/// window has no root yet.
///
/// # Safety
/// `window` must be `nil` or a valid UIWindow; main thread only.
pub unsafe fn top_view_controller(window: id) -> id {
    if window.is_null() {
        return nil;
    }
    let mut top: id = msg_send![window, rootViewController];
    while !top.is_null() {
        let presented: id = msg_send![top, presentedViewController];
        if presented.is_null() {
            break;
        }
        top = presented;
    }
    top
}

/// Present the action menu from `presenter`. Returns the alert controller
/// (autoreleased) or `nil`.
///
/// # Safety
/// `presenter` must be a valid UIViewController, `anchor` `nil` or a valid
/// UIView; main thread only.
pub unsafe fn present_menu(
    presenter: id,
    anchor: id,
    entries: &[MenuAction],
    style: MenuStyle,
) -> id {
    let Some(alert) = alert_controller(MENU_TITLE, None, style.raw_value()) else {
        return nil;
    };

    for entry in entries {
        let action_style = if entry.is_destructive() {
            ACTION_DESTRUCTIVE
        } else {
            ACTION_DEFAULT
        };
        let handler = if entry.needs_domain() {
            let presenter = weak_ref(presenter);
            RcBlock::new(move |_action: id| {
                let presenter = presenter.as_ref().and_then(|w| w.load());
                match presenter {
                    Some(presenter) => unsafe {
                        present_domain_prompt(Retained::as_ptr(&presenter) as id);
                    },
                    None => {
                        events::publish(OverlayEvent::MenuDismissed);
                        pump();
                    }
                }
            })
        } else {
            let selected = entry.clone();
            RcBlock::new(move |_action: id| {
                events::publish(OverlayEvent::MenuSelected(selected.clone()));
                pump();
            })
        };
        add_action(alert, entry.title(), action_style, &handler);
    }

    let cancel = RcBlock::new(|_action: id| {
        events::publish(OverlayEvent::MenuDismissed);
        pump();
    });
    add_action(alert, "Cancel", ACTION_CANCEL, &cancel);

    // Action sheets need a source view on iPad.
    let popover: id = msg_send![alert, popoverPresentationController];
    if !popover.is_null() && !anchor.is_null() {
        let _: () = msg_send![popover, setSourceView: anchor];
        let bounds: CGRect = msg_send![anchor, bounds];
        let _: () = msg_send![popover, setSourceRect: bounds];
    }

    let _: () = msg_send![presenter, presentViewController: alert, animated: YES, completion: nil];
    debug!(entries = entries.len(), "menu presented");
    alert
}

/// Ask for a domain, then publish `DeleteCookiesForDomain(domain)`.
///
/// # Safety
/// `presenter` must be a valid UIViewController; main thread only.
pub unsafe fn present_domain_prompt(presenter: id) {
    let Some(alert) = alert_controller(
        "Delete Cookies for Domain",
        Some("Cookies for the domain and its subdomains are removed."),
        STYLE_ALERT,
    ) else {
        events::publish(OverlayEvent::MenuDismissed);
        pump();
        return;
    };

    let configure = RcBlock::new(|field: id| unsafe {
        let placeholder = nsstring(DOMAIN_PLACEHOLDER);
        let _: () = msg_send![field, setPlaceholder: &*placeholder];
        let _: () = msg_send![field, setKeyboardType: KEYBOARD_URL];
        let _: () = msg_send![field, setAutocapitalizationType: AUTOCAPITALIZE_NONE];
        let _: () = msg_send![field, setAutocorrectionType: AUTOCORRECT_NO];
    });
    let _: () = msg_send![alert, addTextFieldWithConfigurationHandler: &*configure];

    let prompt = weak_ref(alert);
    let delete = RcBlock::new(move |_action: id| {
        let domain = prompt
            .as_ref()
            .and_then(|w| w.load())
            .and_then(|alert| unsafe { first_field_text(Retained::as_ptr(&alert) as id) })
            .unwrap_or_default();
        events::publish(OverlayEvent::MenuSelected(MenuAction::DeleteCookiesForDomain(
            domain,
        )));
        pump();
    });
    add_action(alert, "Delete", ACTION_DESTRUCTIVE, &delete);

    let cancel = RcBlock::new(|_action: id| {
        events::publish(OverlayEvent::MenuDismissed);
        pump();
    });
    add_action(alert, "Cancel", ACTION_CANCEL, &cancel);

    let _: () = msg_send![presenter, presentViewController: alert, animated: YES, completion: nil];
}

/// Show a result message with a single OK button.
///
/// # Safety
/// `presenter` must be a valid UIViewController; main thread only.
pub unsafe fn present_message(presenter: id, message: &ResultMessage) {
    let Some(alert) = alert_controller(&message.title, Some(&message.body), STYLE_ALERT) else {
        warn!(title = %message.title, "cannot present result message");
        return;
    };
    let ok = RcBlock::new(|_action: id| {});
    add_action(alert, "OK", ACTION_DEFAULT, &ok);
    let _: () = msg_send![presenter, presentViewController: alert, animated: YES, completion: nil];
}

/// Dismiss `alert` if it is still on screen.
///
/// # Safety
/// `alert` must be `nil` or a valid UIViewController; main thread only.
pub unsafe fn dismiss(alert: id) {
    if alert.is_null() {
        return;
    }
    let presenting: id = msg_send![alert, presentingViewController];
    if !presenting.is_null() {
        let _: () = msg_send![alert, dismissViewControllerAnimated: NO, completion: nil];
    }
}

unsafe fn alert_controller(title: &str, message: Option<&str>, style: isize) -> Option<id> {
    let cls = get_class("UIAlertController")?;
    let title = nsstring(title);
    let message = message.map(nsstring);
    let message_ptr: id = match &message {
        Some(m) => &**m as *const _ as id,
        None => nil,
    };
    let alert: id = msg_send![
        cls,
        alertControllerWithTitle: &*title,
        message: message_ptr,
        preferredStyle: style
    ];
    (!alert.is_null()).then_some(alert)
}

unsafe fn add_action(alert: id, title: &str, style: isize, handler: &RcBlock<dyn Fn(id)>) {
    let Some(cls) = get_class("UIAlertAction") else {
        return;
    };
    let title = nsstring(title);
    let action: id = msg_send![cls, actionWithTitle: &*title, style: style, handler: &**handler];
    if !action.is_null() {
        let _: () = msg_send![alert, addAction: action];
    }
}

unsafe fn first_field_text(alert: id) -> Option<String> {
    let fields: id = msg_send![alert, textFields];
    let field = *array_items(fields).first()?;
    string_from_ns(msg_send![field, text]).map(|s| s.trim().to_string())
}
