//! BlueTrails Core Types
//!
//! This crate provides the shared types used throughout the gateway:
//! - The recognized locale set and its parsing rules
//! - Request parameter validation (slugs, dates)
//! - The uniform JSON response envelope

pub mod envelope;
pub mod locale;
pub mod validation;

pub use envelope::{ErrorBody, ErrorEnvelope, SuccessEnvelope};
pub use locale::Locale;
