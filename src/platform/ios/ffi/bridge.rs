//! objc2 aliases and runtime helpers shared by the UIKit glue.
//!
//! Everything here is deliberately untyped (`id`): the glue talks to UIKit
//! through `msg_send!` and keeps typed wrappers for the few classes it
//! actually names.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]

use std::ffi::{c_char, CStr, CString};

pub use objc2::rc::{Retained, Weak};
pub use objc2::runtime::{AnyClass, AnyObject, Bool, Sel};
pub use objc2::{msg_send, sel, ClassType};

pub use objc2_core_foundation::{CGFloat, CGPoint, CGRect, CGSize};
pub use objc2_foundation::NSString;
pub use objc2_ui_kit::UIApplication;

pub use block2::RcBlock;

use crate::model::{Point, Rect};

/// Objective-C object pointer.
pub type id = *mut AnyObject;

pub const nil: id = std::ptr::null_mut();

pub const YES: Bool = Bool::YES;
pub const NO: Bool = Bool::NO;

/// Look up a class by name. `None` when the runtime doesn't have it, which
/// is how newer-API checks are done (`UIWindowScene` before iOS 13).
#[inline]
pub fn get_class(name: &str) -> Option<&'static AnyClass> {
    let c_name = CString::new(name).ok()?;
    AnyClass::get(&c_name)
}

/// The shared UIApplication, `nil` before UIKit finished launching.
#[inline]
#[allow(non_snake_case)]
pub fn UIApp() -> id {
    unsafe { msg_send![UIApplication::class(), sharedApplication] }
}

#[inline]
pub fn nsstring(s: &str) -> Retained<NSString> {
    NSString::from_str(s)
}

/// Copy an `NSString` into a Rust `String`. `None` for `nil`.
///
/// # Safety
/// `s` must be `nil` or a valid NSString.
pub unsafe fn string_from_ns(s: id) -> Option<String> {
    if s.is_null() {
        return None;
    }
    let utf8: *const c_char = msg_send![s, UTF8String];
    if utf8.is_null() {
        return None;
    }
    Some(CStr::from_ptr(utf8).to_string_lossy().into_owned())
}

/// Items of an `NSArray` (borrowed, not retained).
///
/// # Safety
/// `array` must be `nil` or a valid NSArray.
pub unsafe fn array_items(array: id) -> Vec<id> {
    if array.is_null() {
        return Vec::new();
    }
    let count: usize = msg_send![array, count];
    (0..count)
        .map(|i| {
            let item: id = msg_send![array, objectAtIndex: i];
            item
        })
        .collect()
}

/// `isKindOfClass:` against a class that may not exist on this OS.
///
/// # Safety
/// `obj` must be a valid object.
pub unsafe fn is_kind_of(obj: id, class_name: &str) -> bool {
    match get_class(class_name) {
        Some(cls) => {
            let kind: Bool = msg_send![obj, isKindOfClass: cls];
            kind.as_bool()
        }
        None => false,
    }
}

pub fn is_main_thread() -> bool {
    get_class("NSThread").is_some_and(|cls| unsafe {
        let main: Bool = msg_send![cls, isMainThread];
        main.as_bool()
    })
}

/// Weak handle to `obj`. `None` for `nil`.
///
/// # Safety
/// `obj` must be `nil` or a valid object.
pub unsafe fn weak_ref(obj: id) -> Option<Weak<AnyObject>> {
    Retained::retain(obj).map(|strong| Weak::from_retained(&strong))
}

pub fn rect_from_cg(r: CGRect) -> Rect {
    Rect::new(r.origin.x, r.origin.y, r.size.width, r.size.height)
}

pub fn cg_from_rect(r: Rect) -> CGRect {
    CGRect::new(
        CGPoint::new(r.origin.x, r.origin.y),
        CGSize::new(r.size.width, r.size.height),
    )
}

pub fn point_from_cg(p: CGPoint) -> Point {
    Point::new(p.x, p.y)
}
