//! Service layer.
//!
//! [`ProductService`] sits between the HTTP handlers and the
//! [`crate::persistence::ProductRepository`] and forwards every call.

pub mod product_service;

pub use product_service::ProductService;
