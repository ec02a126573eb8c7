//! Web server module
//!
//! Provides the HTTP+JSON API for Reflex-Search.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
