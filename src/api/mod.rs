//! Portal JSON API.
//!
//! `router` builds the axum `Router`, `server` runs it. Every JSON response
//! is HTTP 200 with a `success` flag; see `error` for the failure body.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::portal_router;
pub use server::{start_server_on, PortalServer};
pub use types::ApiContext;
