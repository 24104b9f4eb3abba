use anyhow::Result;
use std::sync::RwLock;

use crate::core::catalog::Catalog;
use crate::store::CatalogStore;

/// In-memory catalog store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Catalog>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogStore for MemoryStore {
    fn load(&self) -> Result<Catalog> {
        Ok(self.inner.read().unwrap().clone())
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        *self.inner.write().unwrap() = catalog.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::exporter::ExporterProfile;

    #[test]
    fn test_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().products().is_empty());

        let mut catalog = Catalog::new();
        catalog.set_exporter_profile(ExporterProfile {
            iec: "0512345678".to_string(),
            ad_code: "6390005".to_string(),
            gst_lut: "AD090122000123X".to_string(),
            pan: "ABCDE1234F".to_string(),
            company_name: "Meridian Exports".to_string(),
            company_address: "14 Marine Drive, Mumbai".to_string(),
        });
        store.save(&catalog).unwrap();

        assert_eq!(store.load().unwrap(), catalog);
    }
}
