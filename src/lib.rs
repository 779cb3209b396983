//! promo-upload - Terminal Promo Code Submission Library
//!
//! A terminal form for submitting promotional purchase codes to the campaign API,
//! with an embedded registration flow for first-time participants.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
