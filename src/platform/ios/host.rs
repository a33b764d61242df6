//! [`HostUi`] over the host app's UIKit windows.
//!
//! Windows are held as `Weak` references and re-resolved on every call; the
//! floating button view and the gesture target are the only objects this
//! host owns.

use tracing::{debug, warn};

use super::ffi::bridge::{
    array_items, cg_from_rect, get_class, id, is_kind_of, msg_send, nil, nsstring, rect_from_cg,
    weak_ref, AnyObject, Bool, CGFloat, CGRect, Retained, UIApp, Weak, NO, YES,
};
use super::gestures::{create_gesture_target, install_recognizers};
use super::menu;
use crate::capabilities::{Capabilities, WindowLookup};
use crate::host::{HostError, HostUi, WindowCandidate};
use crate::model::Rect;
use crate::overlay::{MenuAction, ResultMessage};

const BUTTON_GLYPH: &str = "🍪";
const GLYPH_POINT_SIZE: CGFloat = 26.0;

// UISceneActivationState: foregroundActive, foregroundInactive
const SCENE_FOREGROUND_ACTIVE: isize = 0;
const SCENE_FOREGROUND_INACTIVE: isize = 1;

// NSTextAlignmentCenter
const TEXT_ALIGNMENT_CENTER: isize = 1;

// UIViewAutoresizingFlexibleWidth | FlexibleHeight
const AUTORESIZE_FILL: usize = (1 << 1) | (1 << 4);

pub struct UiKitHost {
    caps: Capabilities,
    tint: (f64, f64, f64, f64),
    button: Option<Retained<AnyObject>>,
    gesture_target: Option<Retained<AnyObject>>,
    menu: Option<Weak<AnyObject>>,
}

impl UiKitHost {
    pub fn new(caps: Capabilities, tint: (f64, f64, f64, f64)) -> Self {
        Self {
            caps,
            tint,
            button: None,
            gesture_target: None,
            menu: None,
        }
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Raw host windows, frontmost scene first.
    unsafe fn window_ids(&self) -> Vec<id> {
        let app = UIApp();
        if app.is_null() {
            return Vec::new();
        }
        let windows = match self.caps.window_lookup {
            WindowLookup::ConnectedScenes => {
                let scenes: id = msg_send![app, connectedScenes];
                let scenes: id = if scenes.is_null() {
                    nil
                } else {
                    msg_send![scenes, allObjects]
                };
                let mut scenes: Vec<(isize, id)> = array_items(scenes)
                    .into_iter()
                    .filter(|&scene| is_kind_of(scene, "UIWindowScene"))
                    .map(|scene| {
                        let state: isize = msg_send![scene, activationState];
                        (state, scene)
                    })
                    .filter(|&(state, _)| {
                        state == SCENE_FOREGROUND_ACTIVE || state == SCENE_FOREGROUND_INACTIVE
                    })
                    .collect();
                scenes.sort_by_key(|&(state, _)| state);
                scenes
                    .into_iter()
                    .flat_map(|(_, scene)| {
                        let windows: id = msg_send![scene, windows];
                        array_items(windows)
                    })
                    .collect()
            }
            WindowLookup::ApplicationWindows => {
                let windows: id = msg_send![app, windows];
                array_items(windows)
            }
        };
        // Keyboard and text-effect windows never host the button.
        windows
            .into_iter()
            .filter(|&w| !w.is_null() && !is_kind_of(w, "UITextEffectsWindow"))
            .collect()
    }

    fn button_ptr(&self) -> id {
        self.button
            .as_ref()
            .map_or(nil, |b| Retained::as_ptr(b) as id)
    }

    unsafe fn gesture_target(&mut self) -> id {
        if let Some(target) = &self.gesture_target {
            return Retained::as_ptr(target) as id;
        }
        let target = create_gesture_target();
        // `new` returned +1; take ownership.
        self.gesture_target = Retained::from_raw(target);
        target
    }

    /// Build the (hidden) round button view.
    unsafe fn build_button(&self, frame: Rect) -> Result<Retained<AnyObject>, HostError> {
        let (Some(view_cls), Some(color_cls)) = (get_class("UIView"), get_class("UIColor")) else {
            return Err(HostError::InstallFailed("UIKit classes missing".into()));
        };
        let view: id = msg_send![view_cls, alloc];
        let view: id = msg_send![view, initWithFrame: cg_from_rect(frame)];
        let view = Retained::from_raw(view)
            .ok_or_else(|| HostError::InstallFailed("UIView init returned nil".into()))?;
        let view_ptr = Retained::as_ptr(&view) as id;
        let radius: CGFloat = frame.size.width.min(frame.size.height) / 2.0;

        let (r, g, b, a) = self.tint;
        let color: id = msg_send![color_cls, colorWithRed: r, green: g, blue: b, alpha: a];
        let _: () = msg_send![view_ptr, setBackgroundColor: color];
        let layer: id = msg_send![view_ptr, layer];
        let _: () = msg_send![layer, setCornerRadius: radius];
        let _: () = msg_send![layer, setShadowOpacity: 0.3f32];
        let _: () = msg_send![layer, setShadowRadius: 4.0 as CGFloat];

        self.add_blur(view_ptr, radius);
        self.add_glyph(view_ptr);

        let _: () = msg_send![view_ptr, setHidden: YES];
        let _: () = msg_send![view_ptr, setUserInteractionEnabled: YES];
        Ok(view)
    }

    unsafe fn add_blur(&self, view: id, radius: CGFloat) {
        let (Some(effect_cls), Some(effect_view_cls)) =
            (get_class("UIBlurEffect"), get_class("UIVisualEffectView"))
        else {
            return;
        };
        let effect: id = msg_send![effect_cls, effectWithStyle: self.caps.blur_style.raw_value()];
        if effect.is_null() {
            return;
        }
        let blur: id = msg_send![effect_view_cls, alloc];
        let blur: id = msg_send![blur, initWithEffect: effect];
        if blur.is_null() {
            return;
        }
        let bounds: CGRect = msg_send![view, bounds];
        let _: () = msg_send![blur, setFrame: bounds];
        let _: () = msg_send![blur, setAutoresizingMask: AUTORESIZE_FILL];
        let _: () = msg_send![blur, setUserInteractionEnabled: NO];
        let _: () = msg_send![blur, setAlpha: 0.6 as CGFloat];
        let layer: id = msg_send![blur, layer];
        let _: () = msg_send![layer, setCornerRadius: radius];
        let _: () = msg_send![layer, setMasksToBounds: YES];
        let _: () = msg_send![view, insertSubview: blur, atIndex: 0isize];
        let _: () = msg_send![blur, release];
    }

    unsafe fn add_glyph(&self, view: id) {
        let (Some(label_cls), Some(font_cls)) = (get_class("UILabel"), get_class("UIFont")) else {
            return;
        };
        let label: id = msg_send![label_cls, alloc];
        let bounds: CGRect = msg_send![view, bounds];
        let label: id = msg_send![label, initWithFrame: bounds];
        if label.is_null() {
            return;
        }
        let text = nsstring(BUTTON_GLYPH);
        let font: id = msg_send![font_cls, systemFontOfSize: GLYPH_POINT_SIZE];
        let _: () = msg_send![label, setText: &*text];
        let _: () = msg_send![label, setFont: font];
        let _: () = msg_send![label, setTextAlignment: TEXT_ALIGNMENT_CENTER];
        let _: () = msg_send![label, setAutoresizingMask: AUTORESIZE_FILL];
        let _: () = msg_send![label, setUserInteractionEnabled: NO];
        let _: () = msg_send![view, addSubview: label];
        let _: () = msg_send![label, release];
    }

    /// The view controller to present from, via the button's window.
    unsafe fn presenter(&self) -> id {
        let button = self.button_ptr();
        if button.is_null() {
            return nil;
        }
        let window: id = msg_send![button, window];
        menu::top_view_controller(window)
    }
}

impl HostUi for UiKitHost {
    type Window = Weak<AnyObject>;

    fn windows(&self) -> Vec<WindowCandidate<Self::Window>> {
        unsafe {
            self.window_ids()
                .into_iter()
                .filter_map(|w| {
                    let is_key: Bool = msg_send![w, isKeyWindow];
                    let is_hidden: Bool = msg_send![w, isHidden];
                    let bounds: CGRect = msg_send![w, bounds];
                    Some(WindowCandidate {
                        handle: weak_ref(w)?,
                        is_key: is_key.as_bool(),
                        is_hidden: is_hidden.as_bool(),
                        frame: rect_from_cg(bounds),
                    })
                })
                .collect()
        }
    }

    fn is_live(&self, window: &Self::Window) -> bool {
        let Some(window) = window.load() else {
            return false;
        };
        let ptr = Retained::as_ptr(&window) as id;
        unsafe { self.window_ids().contains(&ptr) }
    }

    fn bounds(&self, window: &Self::Window) -> Option<Rect> {
        let window = window.load()?;
        let bounds: CGRect = unsafe { msg_send![&*window, bounds] };
        Some(rect_from_cg(bounds))
    }

    fn install_overlay(&mut self, window: &Self::Window, frame: Rect) -> Result<(), HostError> {
        let window = window.load().ok_or(HostError::WindowGone)?;
        let window_ptr = Retained::as_ptr(&window) as id;
        unsafe {
            // A window without a root controller is still launching.
            let root: id = msg_send![window_ptr, rootViewController];
            if root.is_null() {
                return Err(HostError::NoRootView);
            }
            self.remove_overlay();

            let button = self.build_button(frame)?;
            let button_ptr = Retained::as_ptr(&button) as id;
            let target = self.gesture_target();
            if target.is_null() || !install_recognizers(button_ptr, target) {
                return Err(HostError::InstallFailed("gesture recognizers unavailable".into()));
            }
            let _: () = msg_send![window_ptr, addSubview: button_ptr];
            let _: () = msg_send![window_ptr, bringSubviewToFront: button_ptr];
            self.button = Some(button);
        }
        debug!("button view installed");
        Ok(())
    }

    fn remove_overlay(&mut self) {
        self.dismiss_menu();
        if let Some(button) = self.button.take() {
            unsafe {
                let _: () = msg_send![&*button, removeFromSuperview];
            }
            debug!("button view removed");
        }
    }

    fn set_overlay_visible(&mut self, visible: bool) {
        let button = self.button_ptr();
        if button.is_null() {
            return;
        }
        unsafe {
            let _: () = msg_send![button, setHidden: Bool::new(!visible)];
            if visible {
                let window: id = msg_send![button, superview];
                if !window.is_null() {
                    let _: () = msg_send![window, bringSubviewToFront: button];
                }
            }
        }
    }

    fn move_overlay(&mut self, frame: Rect) {
        let button = self.button_ptr();
        if !button.is_null() {
            unsafe {
                let _: () = msg_send![button, setFrame: cg_from_rect(frame)];
            }
        }
    }

    fn present_menu(&mut self, entries: &[MenuAction]) {
        self.dismiss_menu();
        unsafe {
            let presenter = self.presenter();
            if presenter.is_null() {
                warn!("no view controller to present the menu from");
                return;
            }
            let alert = menu::present_menu(presenter, self.button_ptr(), entries, self.caps.menu_style);
            self.menu = weak_ref(alert);
        }
    }

    fn dismiss_menu(&mut self) {
        if let Some(alert) = self.menu.take().and_then(|w| w.load()) {
            unsafe { menu::dismiss(Retained::as_ptr(&alert) as id) };
        }
    }

    fn present_message(&mut self, message: &ResultMessage) {
        unsafe {
            let presenter = self.presenter();
            if presenter.is_null() {
                warn!(title = %message.title, "no view controller to present the message from");
                return;
            }
            menu::present_message(presenter, message);
        }
    }
}

impl Drop for UiKitHost {
    fn drop(&mut self) {
        self.remove_overlay();
    }
}
