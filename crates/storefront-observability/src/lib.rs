//! Observability for the storefront engine.
//!
//! This crate provides:
//! - `LogConfig` / `init_logging` - `tracing` subscriber setup (human or JSON)
//! - `session_span` - A span that tags events with the shopper session id

mod logging;
mod span;

pub use logging::*;
pub use span::*;
