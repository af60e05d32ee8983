//! Product catalogue: the domain served on top of the router.
//!
//! - [`model`] - the `Product` record
//! - [`repository`] - storage abstraction and its in-memory implementation
//! - [`controller`] - handlers for the `/api/v1/products` endpoints
//! - [`routes`] - the route registrations for the service

pub mod controller;
pub mod model;
pub mod repository;
pub mod routes;

pub use controller::{ProductController, PRODUCT_ID_PARAM};
pub use model::Product;
pub use repository::{InMemoryRepository, Repository, RepositoryError};
pub use routes::{register_routes, HEALTH_PATH, PRODUCTS_PATH, PRODUCT_PATH};
