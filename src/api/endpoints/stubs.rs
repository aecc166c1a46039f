//! Placeholder route groups.
//!
//! Each group answers `GET /api/<group>/test` with a fixed message and
//! has no other behavior yet.

use axum::routing::get;
use axum::{Json, Router};

use crate::api::types::{ApiContext, MessageResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGroup {
    Auth,
    Chatbot,
    Patient,
    Pdf,
    Schedule,
}

impl RouteGroup {
    pub const ALL: [RouteGroup; 5] = [
        RouteGroup::Auth,
        RouteGroup::Chatbot,
        RouteGroup::Patient,
        RouteGroup::Pdf,
        RouteGroup::Schedule,
    ];

    /// Mount point under `/api`.
    pub fn prefix(self) -> &'static str {
        match self {
            RouteGroup::Auth => "/auth",
            RouteGroup::Chatbot => "/chatbot",
            RouteGroup::Patient => "/patient",
            RouteGroup::Pdf => "/pdf",
            RouteGroup::Schedule => "/schedule",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RouteGroup::Auth => "Auth route is working!",
            RouteGroup::Chatbot => "Chatbot route is working!",
            RouteGroup::Patient => "Patient route is working!",
            RouteGroup::Pdf => "PDF route is working!",
            RouteGroup::Schedule => "Schedule route is working!",
        }
    }

    pub fn routes(self) -> Router<ApiContext> {
        let message = self.message();
        Router::new().route("/test", get(move || async move { Json(MessageResponse { message }) }))
    }
}
