//! HTTP boundary: the submission form, screening endpoints, health and
//! metrics.

pub mod handlers;
pub mod pages;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
