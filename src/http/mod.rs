//! HTTP server lifecycle.
//!
//! Binds the configured address, serves the router, and drains in-flight
//! requests on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{serve_until, start_server, ServerError};
pub use shutdown::shutdown_signal;
