//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use community_core::CommunityStore;
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// One `CommunityStore` per process plays the part of one browser origin:
/// every request sees the same collections and the same session pointer.
#[derive(Clone)]
pub struct AppState {
    pub community: CommunityStore,
    pub config: Arc<Config>,
}
