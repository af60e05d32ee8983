//! Product storage.
//!
//! Handlers only talk to storage through [`Repository`]. The service ships
//! with [`InMemoryRepository`]; a relational backend can be plugged in by
//! implementing the same trait.

use super::model::Product;
use dashmap::DashMap;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::debug;

/// Errors reported by a [`Repository`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No product with this id exists
    NotFound(i64),
    /// The backing store failed
    Storage(String),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::NotFound(id) => write!(f, "product {id} not found"),
            RepositoryError::Storage(message) => write!(f, "storage failure: {message}"),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Storage abstraction over product records
pub trait Repository: Send + Sync {
    /// Store products. Records with `id == 0` are assigned a new id; records
    /// with an explicit id replace any existing record with that id.
    ///
    /// Returns the stored records with their final ids.
    fn create(&self, products: &[Product]) -> Result<Vec<Product>, RepositoryError>;

    /// All products ordered by id
    fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;

    fn find_by_id(&self, id: i64) -> Result<Product, RepositoryError>;

    /// Remove products by id; ids that do not exist are ignored
    fn delete(&self, products: &[Product]) -> Result<(), RepositoryError>;
}

/// Process-local repository backed by a concurrent map
#[derive(Debug)]
pub struct InMemoryRepository {
    products: DashMap<i64, Product>,
    /// Highest id handed out or stored so far
    last_id: AtomicI64,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: DashMap::new(),
            last_id: AtomicI64::new(0),
        }
    }

    /// Build a repository pre-populated with `products`
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Repository::create`].
    pub fn with_products(products: &[Product]) -> Result<Self, RepositoryError> {
        let repo = Self::new();
        repo.create(products)?;
        Ok(repo)
    }

    /// Take the next unused id; fails once `i64::MAX` has been used
    fn next_id(&self) -> Result<i64, RepositoryError> {
        self.last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .map(|last| last + 1)
            .map_err(|_| RepositoryError::Storage("id space exhausted".to_string()))
    }

    /// Keep the id sequence ahead of explicitly supplied ids
    fn reserve(&self, id: i64) {
        self.last_id.fetch_max(id, Ordering::SeqCst);
    }
}

impl Repository for InMemoryRepository {
    fn create(&self, products: &[Product]) -> Result<Vec<Product>, RepositoryError> {
        let mut stored = Vec::with_capacity(products.len());
        for product in products {
            let mut product = product.clone();
            if product.id == 0 {
                product.id = self.next_id()?;
            } else {
                self.reserve(product.id);
            }
            self.products.insert(product.id, product.clone());
            stored.push(product);
        }
        debug!(count = stored.len(), "Products stored");
        Ok(stored)
    }

    fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut all: Vec<Product> = self
            .products
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by_key(|p| p.id);
        Ok(all)
    }

    fn find_by_id(&self, id: i64) -> Result<Product, RepositoryError> {
        self.products
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(RepositoryError::NotFound(id))
    }

    fn delete(&self, products: &[Product]) -> Result<(), RepositoryError> {
        for product in products {
            self.products.remove(&product.id);
        }
        debug!(count = products.len(), "Products deleted");
        Ok(())
    }
}
