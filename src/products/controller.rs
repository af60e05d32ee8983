//! Handlers for the product endpoints.
//!
//! Each handler reads what it needs from the request and the path parameters,
//! talks to the [`Repository`], and translates every failure into a status
//! code itself. Nothing above this layer inspects handler errors.

use super::model::Product;
use super::repository::{Repository, RepositoryError};
use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::router::PathParams;
use serde::Deserialize;
use tracing::{error, warn};

/// Name of the path parameter carrying a product id
pub const PRODUCT_ID_PARAM: &str = "productid";

#[derive(Debug, Deserialize)]
struct CreateProductRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    retailer: String,
    #[serde(default)]
    price: f32,
    #[serde(default)]
    description: String,
}

impl CreateProductRequest {
    fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.retailer.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct UpdateProductRequest {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    retailer: String,
    #[serde(default)]
    price: f32,
    #[serde(default)]
    description: String,
}

impl UpdateProductRequest {
    fn is_valid(&self) -> bool {
        self.id != 0
    }
}

/// Parse the `productid` path parameter; `None` means 400.
fn product_id(params: &PathParams) -> Option<i64> {
    params.get(PRODUCT_ID_PARAM)?.parse().ok()
}

fn storage_failure(req: &HandlerRequest, e: &RepositoryError) -> HandlerResponse {
    error!(request_id = %req.request_id, path = %req.path, error = %e, "Product storage failed");
    HandlerResponse::status(500)
}

fn bad_request(req: &HandlerRequest, reason: &str) -> HandlerResponse {
    warn!(request_id = %req.request_id, path = %req.path, reason = reason, "Rejected product request");
    HandlerResponse::status(400)
}

/// Product endpoints over any [`Repository`]
#[derive(Debug)]
pub struct ProductController<R> {
    repository: R,
}

impl<R: Repository> ProductController<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// `GET /api/v1/products`
    pub fn get_products(&self, req: &HandlerRequest, _params: &PathParams) -> HandlerResponse {
        match self.repository.find_all() {
            Ok(products) => HandlerResponse::json(200, &products),
            Err(e) => storage_failure(req, &e),
        }
    }

    /// `POST /api/v1/products`
    pub fn post_products(&self, req: &HandlerRequest, _params: &PathParams) -> HandlerResponse {
        let request: CreateProductRequest = match serde_json::from_slice(&req.body) {
            Ok(r) => r,
            Err(_) => return bad_request(req, "malformed JSON body"),
        };
        if !request.is_valid() {
            return bad_request(req, "name and retailer are required");
        }

        let product = Product {
            id: 0,
            name: request.name,
            retailer: request.retailer,
            price: request.price,
            description: request.description,
        };
        match self.repository.create(std::slice::from_ref(&product)) {
            Ok(mut stored) => match stored.pop() {
                Some(created) => HandlerResponse::json(201, &created),
                None => HandlerResponse::status(201),
            },
            Err(e) => storage_failure(req, &e),
        }
    }

    /// `GET /api/v1/products/:productid`
    pub fn get_product(&self, req: &HandlerRequest, params: &PathParams) -> HandlerResponse {
        let Some(id) = product_id(params) else {
            return bad_request(req, "productid is not an integer");
        };
        match self.repository.find_by_id(id) {
            Ok(product) => HandlerResponse::json(200, &product),
            Err(RepositoryError::NotFound(_)) => HandlerResponse::not_found(),
            Err(e) => storage_failure(req, &e),
        }
    }

    /// `PUT /api/v1/products/:productid`
    pub fn put_product(&self, req: &HandlerRequest, params: &PathParams) -> HandlerResponse {
        let Some(id) = product_id(params) else {
            return bad_request(req, "productid is not an integer");
        };
        let request: UpdateProductRequest = match serde_json::from_slice(&req.body) {
            Ok(r) => r,
            Err(_) => return bad_request(req, "malformed JSON body"),
        };
        if !request.is_valid() {
            return bad_request(req, "id is required");
        }
        if request.id != id {
            return bad_request(req, "body id does not match productid");
        }

        let product = Product {
            id: request.id,
            name: request.name,
            retailer: request.retailer,
            price: request.price,
            description: request.description,
        };
        match self.repository.create(std::slice::from_ref(&product)) {
            Ok(_) => HandlerResponse::json(200, &product),
            Err(e) => storage_failure(req, &e),
        }
    }

    /// `DELETE /api/v1/products/:productid`
    pub fn delete_product(&self, req: &HandlerRequest, params: &PathParams) -> HandlerResponse {
        let Some(id) = product_id(params) else {
            return bad_request(req, "productid is not an integer");
        };
        let product = match self.repository.find_by_id(id) {
            Ok(product) => product,
            Err(RepositoryError::NotFound(_)) => return HandlerResponse::not_found(),
            Err(e) => return storage_failure(req, &e),
        };
        match self.repository.delete(std::slice::from_ref(&product)) {
            Ok(()) => HandlerResponse::status(204),
            Err(e) => storage_failure(req, &e),
        }
    }
}
