//! # Router Module
//!
//! Path matching and route resolution for the product service.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling path templates such as `/api/v1/products/:productid` into
//!   anchored matchers plus ordered parameter names
//! - Building the ordered, immutable route table at startup
//! - Matching an incoming method and path against that table
//! - Extracting path parameters from the matched route
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Compilation**: At startup, every registered template is converted into
//!    a regex such as `^/api/v1/products/([^/]+)$` together with its parameter
//!    names. [`RouterBuilder::build`] then freezes the table.
//!
//! 2. **Matching**: For each incoming request, the router scans the table in
//!    registration order, skipping routes registered under another method, and
//!    returns the first route whose pattern matches the entire path.
//!
//! First registration wins, not best match. A broad route registered before a
//! more specific one for the same method shadows it.
//!
//! ## Example
//!
//! ```rust
//! use product_service::dispatcher::HandlerResponse;
//! use product_service::router::Router;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = Router::builder();
//! builder.get("/items/:id", |_req, _params| HandlerResponse::status(200))?;
//! let router = builder.build();
//!
//! let matched = router.route(&http::Method::GET, "/items/42").unwrap();
//! assert_eq!(matched.path_params.get("id"), Some("42"));
//! assert!(router.route(&http::Method::DELETE, "/items/42").is_none());
//! # Ok(())
//! # }
//! ```

mod core;
mod method;
mod pattern;

pub use self::core::{ParamVec, PathParams, Route, RouteMatch, Router, RouterBuilder, MAX_INLINE_PARAMS};
pub use method::{Method, UnsupportedMethod};
pub use pattern::{compile, Pattern, PatternError};
