//! HTTP API.
//!
//! Routes are nested under `/api/`. The only route with behavior is
//! `POST /api/patients`; the auth, chatbot, patient, pdf and schedule
//! groups each expose a `GET /test` acknowledgement.
//!
//! The router is composable — `api_router()` returns a `Router` that can
//! be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{start_server, IntakeServer, ServerSession};
pub use types::ApiContext;
