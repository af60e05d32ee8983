//! Tests for the product endpoints
//!
//! Requests go through the real route table built by `build_dispatcher`, so
//! these cover routing and controller behaviour together.

use http::Method;
use product_service::app::build_dispatcher;
use product_service::products::{InMemoryRepository, Product, Repository, RepositoryError};
use product_service::{Dispatcher, HandlerRequest, HandlerResponse};
use serde_json::{json, Value};

fn milk() -> Product {
    Product {
        id: 0,
        name: "Milk".to_string(),
        retailer: "Corner Shop".to_string(),
        price: 1.25,
        description: "Semi-skimmed".to_string(),
    }
}

fn seeded() -> Dispatcher {
    let repo = InMemoryRepository::with_products(&[milk()]).unwrap();
    build_dispatcher(repo).unwrap()
}

fn send(dispatcher: &Dispatcher, method: Method, path: &str, body: Option<Value>) -> HandlerResponse {
    let mut req = HandlerRequest::new(method, path);
    if let Some(body) = body {
        req = req
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_vec(&body).unwrap());
    }
    dispatcher.dispatch(&req)
}

fn body_json(res: &HandlerResponse) -> Value {
    serde_json::from_slice(&res.body).unwrap()
}

#[test]
fn test_list_products() {
    let dispatcher = seeded();
    let res = send(&dispatcher, Method::GET, "/api/v1/products", None);
    assert_eq!(res.status, 200);
    assert_eq!(res.get_header("content-type"), Some("application/json"));
    let body = body_json(&res);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], 1);
    assert_eq!(body[0]["name"], "Milk");
}

#[test]
fn test_list_empty_repository() {
    let dispatcher = build_dispatcher(InMemoryRepository::new()).unwrap();
    let res = send(&dispatcher, Method::GET, "/api/v1/products", None);
    assert_eq!(res.status, 200);
    assert_eq!(body_json(&res), json!([]));
}

#[test]
fn test_create_then_fetch() {
    let dispatcher = seeded();
    let res = send(
        &dispatcher,
        Method::POST,
        "/api/v1/products",
        Some(json!({"name": "Bread", "retailer": "Bakery", "price": 2.5})),
    );
    assert_eq!(res.status, 201);
    let created = body_json(&res);
    assert_eq!(created["id"], 2);
    assert_eq!(created["name"], "Bread");
    assert_eq!(created["description"], "");

    let res = send(&dispatcher, Method::GET, "/api/v1/products/2", None);
    assert_eq!(res.status, 200);
    assert_eq!(body_json(&res), created);
}

#[test]
fn test_create_rejects_invalid_payloads() {
    let dispatcher = seeded();
    let res = send(
        &dispatcher,
        Method::POST,
        "/api/v1/products",
        Some(json!({"name": "", "retailer": "Bakery"})),
    );
    assert_eq!(res.status, 400);

    let req = HandlerRequest::new(Method::POST, "/api/v1/products").with_body(b"{not json".to_vec());
    assert_eq!(dispatcher.dispatch(&req).status, 400);

    let res = send(&dispatcher, Method::GET, "/api/v1/products", None);
    assert_eq!(body_json(&res).as_array().unwrap().len(), 1);
}

#[test]
fn test_get_missing_and_malformed_ids() {
    let dispatcher = seeded();
    let res = send(&dispatcher, Method::GET, "/api/v1/products/99", None);
    assert_eq!(res.status, 404);
    assert!(res.body.is_empty());

    let res = send(&dispatcher, Method::GET, "/api/v1/products/abc", None);
    assert_eq!(res.status, 400);
}

#[test]
fn test_update_product() {
    let dispatcher = seeded();
    let res = send(
        &dispatcher,
        Method::PUT,
        "/api/v1/products/1",
        Some(json!({"id": 1, "name": "Oat Milk", "retailer": "Corner Shop", "price": 1.75})),
    );
    assert_eq!(res.status, 200);
    assert_eq!(body_json(&res)["name"], "Oat Milk");

    let res = send(&dispatcher, Method::GET, "/api/v1/products/1", None);
    assert_eq!(body_json(&res)["name"], "Oat Milk");
}

#[test]
fn test_update_rejects_missing_or_mismatched_id() {
    let dispatcher = seeded();
    let res = send(
        &dispatcher,
        Method::PUT,
        "/api/v1/products/1",
        Some(json!({"name": "No id"})),
    );
    assert_eq!(res.status, 400);

    let res = send(
        &dispatcher,
        Method::PUT,
        "/api/v1/products/1",
        Some(json!({"id": 2, "name": "Wrong id"})),
    );
    assert_eq!(res.status, 400);

    let res = send(&dispatcher, Method::GET, "/api/v1/products/1", None);
    assert_eq!(body_json(&res)["name"], "Milk");
}

#[test]
fn test_post_after_max_id_put_does_not_overwrite() {
    let dispatcher = seeded();
    let max = i64::MAX;
    let path = format!("/api/v1/products/{max}");
    let res = send(
        &dispatcher,
        Method::PUT,
        &path,
        Some(json!({"id": max, "name": "Keep", "retailer": "Corner Shop"})),
    );
    assert_eq!(res.status, 200);

    let res = send(
        &dispatcher,
        Method::POST,
        "/api/v1/products",
        Some(json!({"name": "New", "retailer": "Bakery"})),
    );
    assert_eq!(res.status, 500);

    let res = send(&dispatcher, Method::GET, &path, None);
    assert_eq!(body_json(&res)["name"], "Keep");
    let res = send(&dispatcher, Method::GET, "/api/v1/products", None);
    assert_eq!(body_json(&res).as_array().unwrap().len(), 2);
}

#[test]
fn test_delete_product() {
    let dispatcher = seeded();
    let res = send(&dispatcher, Method::DELETE, "/api/v1/products/1", None);
    assert_eq!(res.status, 204);
    assert!(res.body.is_empty());

    let res = send(&dispatcher, Method::GET, "/api/v1/products/1", None);
    assert_eq!(res.status, 404);

    let res = send(&dispatcher, Method::DELETE, "/api/v1/products/1", None);
    assert_eq!(res.status, 404);
}

#[test]
fn test_health_endpoint() {
    let dispatcher = build_dispatcher(InMemoryRepository::new()).unwrap();
    let res = send(&dispatcher, Method::GET, "/health", None);
    assert_eq!(res.status, 200);
    assert_eq!(body_json(&res), json!({"status": "ok"}));
}

#[test]
fn test_route_table_order() {
    let dispatcher = build_dispatcher(InMemoryRepository::new()).unwrap();
    let table: Vec<(String, String)> = dispatcher
        .router()
        .routes()
        .iter()
        .map(|r| (r.method().to_string(), r.template().to_string()))
        .collect();
    let expected = [
        ("GET", "/api/v1/products"),
        ("POST", "/api/v1/products"),
        ("GET", "/api/v1/products/:productid"),
        ("PUT", "/api/v1/products/:productid"),
        ("DELETE", "/api/v1/products/:productid"),
        ("GET", "/health"),
    ];
    let expected: Vec<(String, String)> = expected
        .iter()
        .map(|(m, t)| (m.to_string(), t.to_string()))
        .collect();
    assert_eq!(table, expected);
}

/// Repository whose every operation fails with a storage error
struct BrokenRepository;

impl Repository for BrokenRepository {
    fn create(&self, _products: &[Product]) -> Result<Vec<Product>, RepositoryError> {
        Err(RepositoryError::Storage("connection refused".to_string()))
    }

    fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Err(RepositoryError::Storage("connection refused".to_string()))
    }

    fn find_by_id(&self, _id: i64) -> Result<Product, RepositoryError> {
        Err(RepositoryError::Storage("connection refused".to_string()))
    }

    fn delete(&self, _products: &[Product]) -> Result<(), RepositoryError> {
        Err(RepositoryError::Storage("connection refused".to_string()))
    }
}

#[test]
fn test_storage_failures_are_500() {
    let dispatcher = build_dispatcher(BrokenRepository).unwrap();

    let res = send(&dispatcher, Method::GET, "/api/v1/products", None);
    assert_eq!(res.status, 500);
    let res = send(
        &dispatcher,
        Method::POST,
        "/api/v1/products",
        Some(json!({"name": "Bread", "retailer": "Bakery"})),
    );
    assert_eq!(res.status, 500);
    let res = send(&dispatcher, Method::GET, "/api/v1/products/1", None);
    assert_eq!(res.status, 500);
    let res = send(
        &dispatcher,
        Method::PUT,
        "/api/v1/products/1",
        Some(json!({"id": 1, "name": "Bread"})),
    );
    assert_eq!(res.status, 500);
    let res = send(&dispatcher, Method::DELETE, "/api/v1/products/1", None);
    assert_eq!(res.status, 500);

    // health does not touch storage
    let res = send(&dispatcher, Method::GET, "/health", None);
    assert_eq!(res.status, 200);
}
