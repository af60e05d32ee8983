//! Router core module - hot path for request routing.
//!
//! The route table is an ordered list scanned linearly. The first route whose
//! method equals the request method and whose pattern matches the whole path
//! wins, even if a later route would be a more specific match.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use super::method::Method;
use super::pattern::{compile, Pattern, PatternError};
use crate::dispatcher::{Handler, HandlerRequest, HandlerResponse};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Names are `Arc<str>` shared with the route table; values are per-request
/// substrings of the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Path parameters extracted for one dispatch.
///
/// Created fresh when a route matches and owned by that request only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(ParamVec);

impl PathParams {
    /// Get a parameter by name.
    ///
    /// Uses "last write wins" semantics if a template repeats a name, e.g.
    /// `/org/:id/user/:id` yields the user id.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Arc<str>, String)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (Arc<str>, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A registered route: method, compiled pattern, parameter names and handler.
pub struct Route {
    method: Method,
    pattern: Pattern,
    param_names: Vec<Arc<str>>,
    handler: Handler,
}

impl Route {
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[must_use]
    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.param_names
    }

    /// Invoke this route's handler
    #[inline]
    pub fn call(&self, req: &HandlerRequest, params: &PathParams) -> HandlerResponse {
        (self.handler)(req, params)
    }

    /// Full-path match; zips captures with parameter names on success.
    fn extract(&self, path: &str) -> Option<PathParams> {
        let captures = self.pattern.captures(path)?;
        Some(
            self.param_names
                .iter()
                .zip(captures)
                .map(|(name, value)| (Arc::clone(name), value.to_owned()))
                .collect(),
        )
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("template", &self.pattern.template())
            .field("param_names", &self.param_names)
            .finish_non_exhaustive()
    }
}

/// Result of successfully matching a request to a route
#[derive(Debug)]
pub struct RouteMatch<'a> {
    /// The first route satisfying both method and path
    pub route: &'a Route,
    /// Path parameters extracted from the URL (e.g., `:productid` → `"42"`)
    pub path_params: PathParams,
}

/// Collects route registrations during startup.
///
/// Registration order is preserved and significant. Call [`RouterBuilder::build`]
/// to freeze the table before serving.
#[derive(Default)]
pub struct RouterBuilder {
    routes: Vec<Route>,
}

impl RouterBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `template` and append a route to the end of the table.
    ///
    /// No deduplication is performed: overlapping registrations are all kept
    /// and the earliest one wins at dispatch time.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the template is malformed.
    pub fn register<F>(
        &mut self,
        method: Method,
        template: &str,
        handler: F,
    ) -> Result<&mut Self, PatternError>
    where
        F: Fn(&HandlerRequest, &PathParams) -> HandlerResponse + Send + Sync + 'static,
    {
        self.register_handler(method, template, Arc::new(handler))
    }

    /// Same as [`RouterBuilder::register`] for an already shared handler.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the template is malformed.
    pub fn register_handler(
        &mut self,
        method: Method,
        template: &str,
        handler: Handler,
    ) -> Result<&mut Self, PatternError> {
        let pattern = compile(template)?;
        let param_names = pattern
            .param_names()
            .iter()
            .map(|name| Arc::from(name.as_str()))
            .collect();

        debug!(
            method = %method,
            template = %template,
            position = self.routes.len(),
            "Route registered"
        );

        self.routes.push(Route {
            method,
            pattern,
            param_names,
            handler,
        });
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns [`PatternError`] if the template is malformed.
    pub fn get<F>(&mut self, template: &str, handler: F) -> Result<&mut Self, PatternError>
    where
        F: Fn(&HandlerRequest, &PathParams) -> HandlerResponse + Send + Sync + 'static,
    {
        self.register(Method::Get, template, handler)
    }

    /// # Errors
    ///
    /// Returns [`PatternError`] if the template is malformed.
    pub fn post<F>(&mut self, template: &str, handler: F) -> Result<&mut Self, PatternError>
    where
        F: Fn(&HandlerRequest, &PathParams) -> HandlerResponse + Send + Sync + 'static,
    {
        self.register(Method::Post, template, handler)
    }

    /// # Errors
    ///
    /// Returns [`PatternError`] if the template is malformed.
    pub fn put<F>(&mut self, template: &str, handler: F) -> Result<&mut Self, PatternError>
    where
        F: Fn(&HandlerRequest, &PathParams) -> HandlerResponse + Send + Sync + 'static,
    {
        self.register(Method::Put, template, handler)
    }

    /// # Errors
    ///
    /// Returns [`PatternError`] if the template is malformed.
    pub fn delete<F>(&mut self, template: &str, handler: F) -> Result<&mut Self, PatternError>
    where
        F: Fn(&HandlerRequest, &PathParams) -> HandlerResponse + Send + Sync + 'static,
    {
        self.register(Method::Delete, template, handler)
    }

    /// Freeze the table.
    #[must_use]
    pub fn build(self) -> Router {
        Router::new(self.routes)
    }
}

/// Immutable, ordered route table.
///
/// Nothing mutates a `Router` after construction, so it can be shared across
/// server workers behind an `Arc` without locking.
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    fn new(routes: Vec<Route>) -> Self {
        let routes_summary: Vec<String> = routes
            .iter()
            .take(10)
            .map(|r| format!("{} {}", r.method, r.template()))
            .collect();

        info!(
            routes_count = routes.len(),
            routes_summary = ?routes_summary,
            routing_algorithm = "linear_first_match",
            "Routing table loaded"
        );

        Self { routes }
    }

    /// Start collecting registrations
    #[must_use]
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Routes in registration order
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Print all registered routes to stdout
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for (i, route) in self.routes.iter().enumerate() {
            println!(
                "[route] #{i} {} {} params={:?}",
                route.method,
                route.template(),
                route.param_names
            );
        }
    }

    /// Find the first route matching `method` and the whole of `path`.
    ///
    /// Routes are tried in registration order; routes registered under a
    /// different method are skipped. A method outside [`Method`] never matches.
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - The first satisfying route with its parameters
    /// * `None` - If no route matches (results in 404)
    #[must_use]
    pub fn route(&self, method: &http::Method, path: &str) -> Option<RouteMatch<'_>> {
        let match_start = Instant::now();

        let Some(wanted) = Method::from_http(method) else {
            debug!(method = %method, path = %path, "Unsupported method, no route matched");
            return None;
        };

        for route in self.routes.iter().filter(|r| r.method == wanted) {
            if let Some(path_params) = route.extract(path) {
                debug!(
                    method = %wanted,
                    path = %path,
                    route_pattern = %route.template(),
                    path_params = ?path_params,
                    duration_us = match_start.elapsed().as_micros(),
                    "Route matched"
                );
                return Some(RouteMatch { route, path_params });
            }
        }

        debug!(
            method = %wanted,
            path = %path,
            duration_us = match_start.elapsed().as_micros(),
            "No route matched"
        );
        None
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").field("routes", &self.routes).finish()
    }
}
