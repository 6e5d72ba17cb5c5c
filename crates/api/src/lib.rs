//! HTTP API: configuration, request wrapper, routing and handlers.

pub mod app;
pub mod config;
pub mod context;
pub mod wrapper;
