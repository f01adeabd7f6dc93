//! Remote data store access.
//!
//! The store is an opaque CRUD collaborator: the widget only ever lists the
//! full product collection (newest first) and inserts single rows. Both
//! operations sit behind [`ProductStore`] so the engine and tests never
//! depend on a concrete backend.

pub mod postgrest;

use std::sync::Arc;

use anyhow::Result;
use futures_util::future::BoxFuture;
use vitrine_types::Product;

pub use postgrest::{PostgrestFactory, PostgrestStore};

/// An authenticated handle to the product collection.
pub trait ProductStore: Send + Sync {
    /// Fetches every product, ordered by creation time descending.
    fn list_products(&self) -> BoxFuture<'_, Result<Vec<Product>>>;

    /// Inserts a product with the given (already trimmed) name.
    fn insert_product(&self, name: &str) -> BoxFuture<'_, Result<()>>;
}

/// Capability to turn a bearer credential into an authenticated store handle.
///
/// Injected into the widget engine at construction time; the engine invokes
/// it once per accepted credential message.
pub trait StoreFactory: Send + Sync {
    fn connect(&self, token: &str) -> Arc<dyn ProductStore>;
}
