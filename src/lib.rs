//! # product-service
//!
//! A product catalogue REST service built around a small, method-aware path
//! router running on the `may` coroutine runtime via `may_minihttp`.
//!
//! ## Architecture
//!
//! - **[`router`]** - Path templates (`/api/v1/products/:productid`) compiled
//!   into anchored regex matchers; an ordered, immutable route table
//! - **[`dispatcher`]** - Single entry point per request: first matching route
//!   wins, its handler receives the extracted path parameters; misses are 404
//! - **[`server`]** - `may_minihttp` adapter that parses requests and writes responses
//! - **[`products`]** - Product model, repository abstraction and controller
//! - **[`config`]**, **[`logging`]**, **[`runtime_config`]**, **[`cli`]** - startup plumbing
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as HttpServer<br/>(may_minihttp)
//!     participant Dispatcher
//!     participant Router
//!     participant Handler as ProductController
//!
//!     Client->>Server: GET /api/v1/products/7
//!     Server->>Dispatcher: dispatch(HandlerRequest)
//!     Dispatcher->>Router: route(GET, "/api/v1/products/7")
//!     Router->>Router: scan routes in registration order
//!     alt No Route Match
//!         Router-->>Dispatcher: None
//!         Dispatcher-->>Client: 404 Not Found (empty body)
//!     end
//!     Router-->>Dispatcher: RouteMatch { productid: "7" }
//!     Dispatcher->>Handler: handler(request, params)
//!     Handler-->>Dispatcher: HandlerResponse
//!     Dispatcher-->>Server: HandlerResponse
//!     Server-->>Client: 200 OK + JSON body
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use product_service::app::build_dispatcher;
//! use product_service::products::InMemoryRepository;
//! use product_service::server::{AppService, HttpServer};
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dispatcher = build_dispatcher(InMemoryRepository::new())?;
//! let handle = HttpServer(AppService::new(Arc::new(dispatcher))).start("0.0.0.0:3000")?;
//! handle.join().map_err(|e| anyhow::anyhow!("{e:?}"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Runtime Considerations
//!
//! The server runs on `may` coroutines, not tokio. The route table is built
//! once before the server starts and is only ever read afterwards, so it is
//! shared between connections without locks.

pub mod app;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod ids;
pub mod logging;
pub mod products;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use dispatcher::{Dispatcher, HandlerRequest, HandlerResponse};
pub use router::{Method, PathParams, Router, RouterBuilder};
