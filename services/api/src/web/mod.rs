pub mod auth;
pub mod newsletter;
pub mod rest;
pub mod router;
pub mod state;
pub mod submissions;

// Re-export the router builder so the binary and the tests can reach it directly.
pub use router::build_router;
