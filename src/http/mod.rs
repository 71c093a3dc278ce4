//! HTTP server module
//!
//! Router construction and the request handlers for the API surface.

pub mod handlers;
pub mod routes;

pub use routes::create_router;
