//! Infrastructure layer providing external service integrations.
//!
//! This module contains the campaign API client, logging setup,
//! runtime configuration and system clipboard access.

pub mod api;
pub mod clipboard;
pub mod config;
pub mod logging;

pub use api::*;
pub use clipboard::*;
pub use config::*;
pub use logging::*;
