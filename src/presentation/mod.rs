//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the upload form, the registration modal and the
//! toasts with ratatui, and dispatches keyboard input to the application.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
