//! API Module
//!
//! HTTP handlers and routing for the cache service REST API.
//!
//! # Endpoints
//! - `PUT /cache` - Cache a value under (category, identifier)
//! - `GET /cache/:category/:identifier` - Look up a cached value
//! - `DELETE /cache/:category/:identifier` - Remove a single entry
//! - `POST /invalidate/:category` - Remove every entry of a category
//! - `GET /stats` - Cache effectiveness metrics
//! - `GET /health` - Tier connectivity and health

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
