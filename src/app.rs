//! Service bootstrap: builds the route table once, then serves it.

use crate::config::AppConfig;
use crate::dispatcher::Dispatcher;
use crate::products::{register_routes, InMemoryRepository, ProductController, Repository};
use crate::router::{PatternError, Router};
use crate::runtime_config::RuntimeConfig;
use crate::server::{AppService, HttpServer, ServerHandle};
use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use tracing::info;

/// Register the product routes over `repository` and freeze the table.
///
/// # Errors
///
/// Returns [`PatternError`] if a route template is malformed.
pub fn build_dispatcher<R>(repository: R) -> Result<Dispatcher, PatternError>
where
    R: Repository + 'static,
{
    let controller = Arc::new(ProductController::new(repository));
    let mut builder = Router::builder();
    register_routes(&mut builder, controller)?;
    Ok(Dispatcher::new(builder.build()))
}

/// Seed the repository from `config`, build the dispatcher and start listening.
///
/// # Errors
///
/// Fails if seeding, route compilation or binding the address fails.
pub fn start(config: &AppConfig) -> Result<ServerHandle> {
    let runtime = RuntimeConfig::from_env();
    runtime.apply();

    let repository = InMemoryRepository::with_products(&config.products)
        .context("could not seed product repository")?;
    let dispatcher = build_dispatcher(repository).context("could not build route table")?;

    let addr = config.bind_addr();
    let handle = HttpServer(AppService::new(Arc::new(dispatcher)))
        .start(addr.as_str())
        .with_context(|| format!("could not listen on {addr}"))?;

    info!(
        addr = %handle.addr(),
        stack_size = runtime.stack_size,
        seeded_products = config.products.len(),
        "Product service listening"
    );
    Ok(handle)
}

/// Start the service and block until the server stops.
///
/// # Errors
///
/// Fails if startup fails or the server coroutine panics.
pub fn serve(config: &AppConfig) -> Result<()> {
    start(config)?
        .join()
        .map_err(|e| anyhow!("server failed: {e:?}"))
}
