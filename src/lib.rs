//! # greencart-backend
//!
//! REST backend for the GreenCart product catalog.
//!
//! The service exposes a single resource, `products`, which can be listed
//! and saved. There is no authentication and no validation beyond JSON type
//! coercion; every request is answered straight from the product store.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, JSON)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── ProductService (service/)
//!     │
//!     ├── ProductRepository (persistence/)
//!     │
//!     └── PostgreSQL  |  in-memory store
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
