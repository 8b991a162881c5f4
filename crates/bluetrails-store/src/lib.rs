//! BlueTrails Store Egress
//!
//! This crate talks to the managed Supabase (PostgREST) store:
//! - A pooled HTTP client with PostgREST query building
//! - The locale-fallback lookup applied to every translated resource
//! - The [`ContentStore`] trait the gateway depends on

pub mod client;
pub mod error;
pub mod lookup;

pub use client::{HttpClientConfig, SelectQuery, StoreClient, StoreConfig};
pub use error::{Result, StoreError};
pub use lookup::{ContentStore, Fetched};
