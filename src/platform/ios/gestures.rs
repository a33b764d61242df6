//! Tap and pan recognizers on the floating button.
//!
//! UIKit calls into a tiny NSObject subclass; each handler translates the
//! recognizer into an [`OverlayEvent`] and pumps the facade.

use objc2::runtime::ClassBuilder;

use super::bootstrap::pump;
use super::ffi::bridge::{
    get_class, id, msg_send, nil, point_from_cg, sel, AnyClass, AnyObject, CGPoint, Sel,
};
use crate::events::{self, OverlayEvent};
use crate::model::Point;

const TARGET_CLASS: &std::ffi::CStr = c"CMOverlayGestureTarget";

// UIGestureRecognizerState
const STATE_BEGAN: isize = 1;
const STATE_CHANGED: isize = 2;
const STATE_ENDED: isize = 3;
const STATE_CANCELLED: isize = 4;
const STATE_FAILED: isize = 5;

/// Register the target class (once) and create an instance. `nil` if the
/// class could not be built.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn create_gesture_target() -> id {
    let Some(cls) = target_class() else {
        return nil;
    };
    let target: id = msg_send![cls, new];
    target
}

unsafe fn target_class() -> Option<&'static AnyClass> {
    if let Some(cls) = AnyClass::get(TARGET_CLASS) {
        return Some(cls);
    }
    let superclass = get_class("NSObject")?;
    let mut builder = ClassBuilder::new(TARGET_CLASS, superclass)?;
    builder.add_method(
        sel!(handleTap:),
        handle_tap as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(handlePan:),
        handle_pan as unsafe extern "C-unwind" fn(_, _, _),
    );
    Some(builder.register())
}

/// Attach a tap and a pan recognizer to `view`, both aimed at `target`.
///
/// # Safety
/// `view` and `target` must be valid; main thread only.
pub unsafe fn install_recognizers(view: id, target: id) -> bool {
    let (Some(tap_cls), Some(pan_cls)) = (
        get_class("UITapGestureRecognizer"),
        get_class("UIPanGestureRecognizer"),
    ) else {
        return false;
    };

    let tap: id = msg_send![tap_cls, alloc];
    let tap: id = msg_send![tap, initWithTarget: target, action: sel!(handleTap:)];
    let pan: id = msg_send![pan_cls, alloc];
    let pan: id = msg_send![pan, initWithTarget: target, action: sel!(handlePan:)];
    if tap.is_null() || pan.is_null() {
        return false;
    }

    // A pan that starts must win over the tap.
    let _: () = msg_send![tap, requireGestureRecognizerToFail: pan];
    let _: () = msg_send![view, addGestureRecognizer: tap];
    let _: () = msg_send![view, addGestureRecognizer: pan];
    // The view retains them now.
    let _: () = msg_send![tap, release];
    let _: () = msg_send![pan, release];
    true
}

unsafe extern "C-unwind" fn handle_tap(_this: &mut AnyObject, _cmd: Sel, _sender: id) {
    events::publish(OverlayEvent::Tapped);
    pump();
}

unsafe extern "C-unwind" fn handle_pan(_this: &mut AnyObject, _cmd: Sel, recognizer: id) {
    if recognizer.is_null() {
        return;
    }
    let state: isize = msg_send![recognizer, state];
    let event = match state {
        STATE_BEGAN => OverlayEvent::DragBegan,
        STATE_CHANGED => OverlayEvent::DragMoved {
            translation: translation(recognizer),
        },
        STATE_ENDED | STATE_CANCELLED | STATE_FAILED => OverlayEvent::DragEnded {
            translation: translation(recognizer),
        },
        _ => return,
    };
    events::publish(event);
    pump();
}

/// Cumulative translation in the coordinates of the button's superview.
unsafe fn translation(recognizer: id) -> Point {
    let view: id = msg_send![recognizer, view];
    let reference: id = if view.is_null() {
        nil
    } else {
        msg_send![view, superview]
    };
    let t: CGPoint = msg_send![recognizer, translationInView: reference];
    point_from_cg(t)
}
