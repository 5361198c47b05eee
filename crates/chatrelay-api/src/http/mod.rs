//! HTTP/REST API layer for chatrelay.
//!
//! Axum-based API with flat JSON bodies (`success` flag plus payload) and
//! permissive CORS.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
