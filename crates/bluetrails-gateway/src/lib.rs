//! BlueTrails Gateway Ingress
//!
//! This crate provides the HTTP surface of the content gateway:
//! - The axum router with one handler per content route
//! - Parameter validation before any store access
//! - CORS preflight handling and response headers
//! - The uniform envelope mapping for lookup outcomes

pub mod cors;
pub mod error;
pub mod routes;
pub mod state;

pub use cors::CorsConfig;
pub use error::GatewayError;
pub use routes::api_router;
pub use state::AppState;
