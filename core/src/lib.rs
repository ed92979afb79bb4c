//! Async API client core for the category service.
//!
//! # Overview
//! `CategoryClient` exposes list/get/create/update/delete over the remote
//! category API. Reads go to the public `/categories` routes, writes to the
//! administrative `/admin/categories` routes.
//!
//! # Design
//! - `codec` builds `HttpRequest` values and parses `HttpResponse` values
//!   without touching the network (host-does-IO pattern).
//! - `Transport` is the only I/O seam; it is injected into `CategoryClient`,
//!   never a process-wide singleton. `ReqwestTransport` is the production
//!   implementation.
//! - The client is stateless: no caching, retries or validation. Failures are
//!   logged once via `tracing` and returned unchanged.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{CategoryClient, Operation};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ErrorPayload};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::{Category, CategoryId, CategoryInput};
