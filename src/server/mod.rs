//! HTTP server adapter.
//!
//! Bridges `may_minihttp` to the [`Dispatcher`](crate::dispatcher::Dispatcher):
//! each inbound request is parsed into a
//! [`HandlerRequest`](crate::dispatcher::HandlerRequest), dispatched, and the
//! resulting [`HandlerResponse`](crate::dispatcher::HandlerResponse) written back.
//! Concurrency (one coroutine per connection) is provided by `may_minihttp`.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_headers, split_path};
pub use response::{status_reason, write_handler_response};
pub use service::AppService;
