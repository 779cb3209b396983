//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! the code upload workflow, the registration modal and the toast queue.

pub mod field;
pub mod registration;
pub mod state;
pub mod toasts;

#[cfg(test)]
pub(crate) mod testing;

pub use field::*;
pub use registration::*;
pub use state::*;
pub use toasts::*;
