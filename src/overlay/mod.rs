//! The floating button and its action menu.

pub mod controller;
pub mod menu;

pub use controller::{OverlayController, OverlayError, OverlayVisualState, ShowStatus};
pub use menu::{ActionReport, MenuAction, ResultMessage};
