//! Dispatcher core module - hot path for request dispatch.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use crate::ids::RequestId;
use crate::router::{PathParams, RouteMatch, Router};
use http::Method;
use serde::Serialize;
use smallvec::SmallVec;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage for the hot path
///
/// Header names use `Arc<str>` so repeated names clone in O(1); values are
/// per-request data.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Callback invoked for a matched route.
///
/// Receives the inbound request and the parameters extracted for this
/// dispatch, and returns the response to send.
pub type Handler = Arc<dyn Fn(&HandlerRequest, &PathParams) -> HandlerResponse + Send + Sync>;

/// Inbound request as seen by handlers
///
/// The body is passed through as raw bytes; the router makes no assumption
/// about its format.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// Unique request ID for tracing and correlation
    pub request_id: RequestId,
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path without the query string
    pub path: String,
    /// Raw query string (text after `?`), if any
    pub query: Option<String>,
    /// HTTP headers with lower-case names
    pub headers: HeaderVec,
    /// Raw request body
    pub body: Vec<u8>,
}

impl HandlerRequest {
    /// Create a request with a fresh id, no headers and an empty body.
    ///
    /// A `?query` suffix on `path` is split off into [`HandlerRequest::query`].
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q.to_owned())),
            None => (path, None),
        };
        Self {
            request_id: RequestId::new(),
            method,
            path: path.to_owned(),
            query,
            headers: HeaderVec::new(),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Add a header; the name is stored lower-case
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .push((Arc::from(name.to_ascii_lowercase()), value.to_owned()));
        self
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response produced by a handler (or by the dispatcher on a miss)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    /// HTTP response headers
    pub headers: HeaderVec,
    /// Response body; empty means no body
    pub body: Vec<u8>,
}

impl HandlerResponse {
    /// Create a new response with the given status, headers, and body
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A response with a status code, no headers and no body
    #[must_use]
    pub fn status(status: u16) -> Self {
        Self::new(status, HeaderVec::new(), Vec::new())
    }

    /// 404 with an empty body
    #[must_use]
    pub fn not_found() -> Self {
        Self::status(404)
    }

    /// Serialize `body` as JSON.
    ///
    /// Falls back to a bare 500 if the value cannot be serialized.
    #[must_use]
    pub fn json<T: Serialize + ?Sized>(status: u16, body: &T) -> Self {
        match serde_json::to_vec(body) {
            Ok(bytes) => {
                let mut headers = HeaderVec::new();
                headers.push((Arc::from("content-type"), "application/json".to_owned()));
                Self::new(status, headers, bytes)
            }
            Err(e) => {
                error!(status = status, error = %e, "Failed to serialize JSON response body");
                Self::status(500)
            }
        }
    }

    /// Get a header by name
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or update a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

/// Routes requests to the handler of the first matching route.
#[derive(Debug)]
pub struct Dispatcher {
    router: Router,
}

impl Dispatcher {
    /// Take ownership of a frozen route table
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Dispatch a request.
    ///
    /// On the first route matching both method and path, its handler is
    /// invoked with a fresh [`PathParams`] and its response returned as is.
    /// Otherwise a 404 with an empty body is returned and no handler runs.
    #[must_use]
    pub fn dispatch(&self, req: &HandlerRequest) -> HandlerResponse {
        let Some(RouteMatch { route, path_params }) = self.router.route(&req.method, &req.path)
        else {
            debug!(
                request_id = %req.request_id,
                method = %req.method,
                path = %req.path,
                "Dispatch not found"
            );
            return HandlerResponse::not_found();
        };

        let execution_start = Instant::now();
        let response = route.call(req, &path_params);

        info!(
            request_id = %req.request_id,
            method = %req.method,
            path = %req.path,
            route_pattern = %route.template(),
            status = response.status,
            execution_time_us = execution_start.elapsed().as_micros(),
            "Handler execution complete"
        );

        response
    }
}
