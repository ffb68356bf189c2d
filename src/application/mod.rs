//! Application layer managing state and user workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! the shared store, background fetches, debounced input and per-screen state.

pub mod state;
pub mod store;
pub mod debounce;
pub mod fetch;

pub use state::*;
pub use store::{Action, AppState, ListenerId, Store, reduce};
pub use debounce::Debouncer;
pub use fetch::{FetchEvent, Fetcher, RequestId};
