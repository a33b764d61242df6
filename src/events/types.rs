//! Overlay events delivered from host callbacks.
//!
//! Timers, gesture recognizers, menu handlers and window notifications run
//! as platform callbacks; they only publish one of these events. The facade
//! drains them on the UI thread and performs the actual work. This module is
//! pure Rust with no FFI dependencies, making it fully testable.

use crate::attach::RetryToken;
use crate::model::Point;
use crate::overlay::MenuAction;

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    // === Timers ===
    /// A retry scheduled by the attachment engine fired.
    RetryElapsed(RetryToken),

    // === Gestures ===
    /// Tap on the floating button.
    Tapped,

    /// Pan gesture started on the button.
    DragBegan,

    /// Pan gesture moved; translation is cumulative since `DragBegan`.
    DragMoved { translation: Point },

    /// Pan gesture ended or was cancelled.
    DragEnded { translation: Point },

    // === Menu ===
    /// The user picked a menu entry (domain filled in when needed).
    MenuSelected(MenuAction),

    /// The menu was dismissed without a selection.
    MenuDismissed,

    // === Host ===
    /// Toggle requested from outside the overlay (API, shortcut).
    ToggleRequested,

    /// Key window or active scene changed.
    HostWindowChanged,
}

impl OverlayEvent {
    /// Returns true for events produced by the button's recognizers.
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            OverlayEvent::Tapped
                | OverlayEvent::DragBegan
                | OverlayEvent::DragMoved { .. }
                | OverlayEvent::DragEnded { .. }
        )
    }

    /// Returns a human-readable description of the event for debugging.
    pub fn description(&self) -> &'static str {
        match self {
            OverlayEvent::RetryElapsed(_) => "Attachment retry fired",
            OverlayEvent::Tapped => "Button tapped",
            OverlayEvent::DragBegan => "Drag began",
            OverlayEvent::DragMoved { .. } => "Drag moved",
            OverlayEvent::DragEnded { .. } => "Drag ended",
            OverlayEvent::MenuSelected(_) => "Menu entry selected",
            OverlayEvent::MenuDismissed => "Menu dismissed",
            OverlayEvent::ToggleRequested => "Toggle requested",
            OverlayEvent::HostWindowChanged => "Host window changed",
        }
    }
}
