//! Server module for building the intake HTTP server
//!
//! This module provides a `ServerBuilder` that registers:
//! - The HTML form routes
//! - The JSON API and health check routes

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use host::ServerHost;
