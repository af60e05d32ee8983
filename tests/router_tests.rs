//! Tests for route matching
//!
//! Covers full-path anchoring, method filtering and first-registration-wins
//! ordering over the route table, without invoking any handlers.

use http::Method;
use product_service::router::{Router, RouterBuilder};
use product_service::HandlerResponse;

fn ok_builder() -> RouterBuilder {
    Router::builder()
}

fn register(builder: &mut RouterBuilder, method: &str, template: &str) {
    builder
        .register(method.parse().unwrap(), template, |_req, _params| {
            HandlerResponse::status(200)
        })
        .unwrap();
}

fn matched_template(router: &Router, method: Method, path: &str) -> Option<String> {
    router
        .route(&method, path)
        .map(|m| m.route.template().to_string())
}

fn product_router() -> Router {
    let mut builder = ok_builder();
    register(&mut builder, "GET", "/api/v1/products");
    register(&mut builder, "POST", "/api/v1/products");
    register(&mut builder, "GET", "/api/v1/products/:productid");
    register(&mut builder, "PUT", "/api/v1/products/:productid");
    register(&mut builder, "DELETE", "/api/v1/products/:productid");
    builder.build()
}

#[test]
fn test_collection_route_is_anchored() {
    let router = product_router();
    assert_eq!(
        matched_template(&router, Method::GET, "/api/v1/products").as_deref(),
        Some("/api/v1/products")
    );
    // /api/v1/products must not be a prefix match for /api/v1/products/99;
    // that path is picked up by the parameterised route instead
    assert_eq!(
        matched_template(&router, Method::POST, "/api/v1/products/99"),
        None
    );
    assert_eq!(matched_template(&router, Method::GET, "/api/v1/productsX"), None);
    assert_eq!(matched_template(&router, Method::GET, "/x/api/v1/products"), None);
}

#[test]
fn test_parameterised_route_requires_segment() {
    let router = product_router();
    assert_eq!(
        matched_template(&router, Method::PUT, "/api/v1/products"),
        None
    );
    assert_eq!(
        matched_template(&router, Method::PUT, "/api/v1/products/"),
        None
    );
    assert_eq!(
        matched_template(&router, Method::PUT, "/api/v1/products/1/extra"),
        None
    );
    assert_eq!(
        matched_template(&router, Method::PUT, "/api/v1/products/1").as_deref(),
        Some("/api/v1/products/:productid")
    );
}

#[test]
fn test_param_value_is_raw_string() {
    let router = product_router();
    let m = router.route(&Method::GET, "/api/v1/products/42").unwrap();
    assert_eq!(m.path_params.get("productid"), Some("42"));

    let m = router.route(&Method::GET, "/api/v1/products/007").unwrap();
    assert_eq!(m.path_params.get("productid"), Some("007"));

    let m = router.route(&Method::GET, "/api/v1/products/not-a-number").unwrap();
    assert_eq!(m.path_params.get("productid"), Some("not-a-number"));
}

#[test]
fn test_method_filters_routes() {
    let router = product_router();
    assert_eq!(
        matched_template(&router, Method::DELETE, "/api/v1/products"),
        None
    );
    assert_eq!(
        matched_template(&router, Method::POST, "/api/v1/products/3"),
        None
    );
    assert_eq!(matched_template(&router, Method::PATCH, "/api/v1/products/3"), None);
}

#[test]
fn test_earlier_broad_route_shadows_later_specific_route() {
    let mut builder = ok_builder();
    register(&mut builder, "GET", "/items/:id");
    register(&mut builder, "GET", "/items/special");
    let router = builder.build();

    let m = router.route(&Method::GET, "/items/special").unwrap();
    assert_eq!(m.route.template(), "/items/:id");
    assert_eq!(m.path_params.get("id"), Some("special"));
}

#[test]
fn test_specific_route_first_is_reachable() {
    let mut builder = ok_builder();
    register(&mut builder, "GET", "/items/special");
    register(&mut builder, "GET", "/items/:id");
    let router = builder.build();

    let m = router.route(&Method::GET, "/items/special").unwrap();
    assert_eq!(m.route.template(), "/items/special");
    assert!(m.path_params.is_empty());

    let m = router.route(&Method::GET, "/items/5").unwrap();
    assert_eq!(m.route.template(), "/items/:id");
}

#[test]
fn test_other_method_does_not_shadow() {
    let mut builder = ok_builder();
    register(&mut builder, "POST", "/items/:id");
    register(&mut builder, "GET", "/items/special");
    let router = builder.build();

    let m = router.route(&Method::GET, "/items/special").unwrap();
    assert_eq!(m.route.template(), "/items/special");
}

#[test]
fn test_underscore_placeholder_is_literal() {
    let mut builder = ok_builder();
    register(&mut builder, "GET", "/items/:item_id");
    let router = builder.build();

    assert!(router.route(&Method::GET, "/items/5").is_none());
    let m = router.route(&Method::GET, "/items/:item_id").unwrap();
    assert!(m.path_params.is_empty());
}
