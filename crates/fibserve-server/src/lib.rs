//! FibServe library — the HTTP layer in front of `fibserve-core`.
//!
//! Parses the requested index from the path, rejects anything that is not a
//! non-negative integer, calls into the core, and renders the result or
//! error as JSON.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod response;
pub mod routes;

pub use routes::{create_router, AppState};
