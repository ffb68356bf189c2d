//! hrdash - Terminal HR Dashboard Library
//!
//! Employee listing, bookmarks, search and filters over a remote employee
//! collection, rendered as a terminal UI.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
