//! Admin Module
//!
//! HTTP administration surface: key listing, manual removal, and flush.

mod handlers;
mod routes;

pub use handlers::AppState;
pub use routes::create_router;
