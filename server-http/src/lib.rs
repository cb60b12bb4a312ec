pub mod api;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod validation;

#[cfg(test)]
mod router_tests;

// Re-export key types
pub use routes::build_router;
pub use state::AppState;
