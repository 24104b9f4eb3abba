use anyhow::{Context, Result};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

use crate::core::catalog::Catalog;
use crate::store::CatalogStore;

/// Fixed namespace for all catalog collections.
const PARTITION: &str = "crosswise";

const KEY_PRODUCTS: &str = "products";
const KEY_ORDERS: &str = "orders";
const KEY_DOCUMENTS: &str = "documents";
const KEY_EXPORTER: &str = "exporter_profile";

/// fjall-backed catalog store. One serde_json value per collection under the
/// fixed `crosswise` partition.
pub struct DiskStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open store at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION, PartitionCreateOptions::default())
            .context("Failed to open catalog partition")?;

        Ok(Self {
            keyspace,
            partition,
        })
    }

    fn read<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.partition.get(key)? {
            Some(bytes) => {
                serde_json::from_slice(&bytes).with_context(|| format!("Corrupt value for {key}"))
            }
            None => Ok(T::default()),
        }
    }
}

impl CatalogStore for DiskStore {
    fn load(&self) -> Result<Catalog> {
        let catalog = Catalog::from_parts(
            self.read(KEY_PRODUCTS)?,
            self.read(KEY_ORDERS)?,
            self.read(KEY_DOCUMENTS)?,
            self.read(KEY_EXPORTER)?,
        );
        debug!(
            products = catalog.products().len(),
            orders = catalog.orders().len(),
            documents = catalog.documents().len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        self.partition
            .insert(KEY_PRODUCTS, serde_json::to_vec(catalog.products())?)?;
        self.partition
            .insert(KEY_ORDERS, serde_json::to_vec(catalog.orders())?)?;
        self.partition
            .insert(KEY_DOCUMENTS, serde_json::to_vec(catalog.documents())?)?;
        self.partition.insert(
            KEY_EXPORTER,
            serde_json::to_vec(&catalog.exporter_profile())?,
        )?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to persist catalog")?;
        debug!("Saved catalog");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::exporter::ExporterProfile;
    use crate::core::id::ProductId;
    use crate::core::product::{Product, ProductDraft};
    use chrono::Utc;
    use tempfile::tempdir;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_product(
            Product::new(
                ProductId::new(),
                ProductDraft {
                    name: "Basmati rice".to_string(),
                    hs_code: "10063020".to_string(),
                    duty_rate: "5%".parse().unwrap(),
                    base_price: 2.0,
                    destination_country: "UAE".to_string(),
                    incentive_info: String::new(),
                },
                Utc::now(),
            )
            .unwrap(),
        );
        catalog.set_exporter_profile(ExporterProfile {
            iec: "0512345678".to_string(),
            ad_code: "6390005".to_string(),
            gst_lut: "AD090122000123X".to_string(),
            pan: "ABCDE1234F".to_string(),
            company_name: "Meridian Exports".to_string(),
            company_address: "14 Marine Drive, Mumbai".to_string(),
        });
        catalog
    }

    #[test]
    fn test_empty_store_loads_empty_catalog() {
        let dir = tempdir().unwrap();
        let store = DiskStore::open(dir.path()).unwrap();
        let catalog = store.load().unwrap();
        assert!(catalog.products().is_empty());
        assert!(catalog.exporter_profile().is_none());
    }

    #[test]
    fn test_catalog_round_trips_across_reopen() {
        let dir = tempdir().unwrap();
        let original = sample_catalog();

        {
            let store = DiskStore::open(dir.path()).unwrap();
            store.save(&original).unwrap();
        }

        let store = DiskStore::open(dir.path()).unwrap();
        let restored = store.load().unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_save_overwrites_previous_state() {
        let dir = tempdir().unwrap();
        let store = DiskStore::open(dir.path()).unwrap();
        store.save(&sample_catalog()).unwrap();
        store.save(&Catalog::new()).unwrap();
        assert!(store.load().unwrap().products().is_empty());
    }
}
