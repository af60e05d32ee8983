//! # Dispatcher Module
//!
//! The dispatcher is the single entry point the HTTP server calls for every
//! inbound request. It asks the [`Router`](crate::router::Router) for the first
//! route satisfying the request's method and path, invokes that route's handler
//! with the extracted path parameters, and returns the handler's response.
//!
//! ## Request Flow
//!
//! 1. Server parses the inbound request into a [`HandlerRequest`]
//! 2. Router scans the route table in registration order
//! 3. On the first match, the handler is called with the request and its
//!    [`PathParams`](crate::router::PathParams)
//! 4. If nothing matches, a 404 with an empty body is returned and no handler runs
//!
//! ## Error Handling
//!
//! The dispatcher only decides "matched or not". Whatever a handler returns
//! (including 4xx/5xx produced for its own failures) is passed back untouched.
//! A path that exists under a different method is reported as 404, not 405.
//!
//! ## Concurrency
//!
//! The dispatcher holds no mutable state. It is shared across server coroutines
//! through an `Arc`, and each `dispatch` call is independent.

mod core;

pub use self::core::{Dispatcher, Handler, HandlerRequest, HandlerResponse, HeaderVec, MAX_INLINE_HEADERS};
