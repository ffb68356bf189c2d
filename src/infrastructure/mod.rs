//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP employee source, configuration loading
//! and log setup.

pub mod client;
pub mod config;
pub mod logging;

pub use client::*;
pub use config::*;
pub use logging::*;
