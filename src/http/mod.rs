//! HTTP server module.
//!
//! Binds the listener, attaches peer addresses for rate limiting, and serves
//! until a shutdown signal arrives. TLS termination is left to the proxy in
//! front of the service.

mod server;
mod shutdown;

pub use server::start_server;
