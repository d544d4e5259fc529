//! HTTP API.
//!
//! Routes are nested under `/api/` behind CORS, a request body limit and
//! an access-log middleware. `api_router()` returns a `Router` that can be
//! mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server_on, ApiServer, ServerError};
pub use types::ApiContext;
