//! Durable persistence for the catalog.
//!
//! The contract is whole-catalog load/save: products, orders, documents and
//! the exporter profile are persisted; conversation messages and any pending
//! classification candidate are session-scoped and never stored.

pub mod disk;
pub mod memory;

use anyhow::Result;

use crate::core::catalog::Catalog;

pub use disk::DiskStore;
pub use memory::MemoryStore;

pub trait CatalogStore: Send + Sync {
    /// Restore the catalog; an empty store yields an empty catalog.
    fn load(&self) -> Result<Catalog>;

    fn save(&self, catalog: &Catalog) -> Result<()>;
}
