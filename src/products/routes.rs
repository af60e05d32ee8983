use super::controller::ProductController;
use super::repository::Repository;
use crate::dispatcher::HandlerResponse;
use crate::router::{PatternError, RouterBuilder};
use serde_json::json;
use std::sync::Arc;

/// Collection endpoint
pub const PRODUCTS_PATH: &str = "/api/v1/products";
/// Single-product endpoint
pub const PRODUCT_PATH: &str = "/api/v1/products/:productid";
/// Liveness endpoint
pub const HEALTH_PATH: &str = "/health";

/// Register the product endpoints followed by `GET /health`.
///
/// # Errors
///
/// Returns [`PatternError`] if a template fails to compile, which is fatal
/// at startup.
pub fn register_routes<R>(
    builder: &mut RouterBuilder,
    controller: Arc<ProductController<R>>,
) -> Result<(), PatternError>
where
    R: Repository + 'static,
{
    let c = Arc::clone(&controller);
    builder.get(PRODUCTS_PATH, move |req, params| c.get_products(req, params))?;
    let c = Arc::clone(&controller);
    builder.post(PRODUCTS_PATH, move |req, params| c.post_products(req, params))?;
    let c = Arc::clone(&controller);
    builder.get(PRODUCT_PATH, move |req, params| c.get_product(req, params))?;
    let c = Arc::clone(&controller);
    builder.put(PRODUCT_PATH, move |req, params| c.put_product(req, params))?;
    let c = controller;
    builder.delete(PRODUCT_PATH, move |req, params| c.delete_product(req, params))?;

    builder.get(HEALTH_PATH, |_req, _params| {
        HandlerResponse::json(200, &json!({ "status": "ok" }))
    })?;
    Ok(())
}
