//! foosball-server: HTTP layer over the foosball services
//!
//! Routes are plain JSON over axum. Storage selection happens in
//! `foosball_core::build_services`; this crate only receives the result.

pub mod http;

pub use http::{router, run_server, ApiError, AppState, ServerConfig, ServerError};
