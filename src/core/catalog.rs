//! The catalog: authoritative collections of products, orders, documents and
//! the exporter profile.
//!
//! Plain owned state, passed by `&mut` into whatever needs to mutate it.
//! There is no interior locking; the application runs a single logical actor
//! and serializes mutations externally. Collections keep insertion order.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::document::{Document, DocumentKind, assemble};
use crate::core::error::{CoreError, CoreResult};
use crate::core::exporter::ExporterProfile;
use crate::core::id::{DocumentId, OrderId, ProductId};
use crate::core::order::{Order, OrderStatus};
use crate::core::product::{Product, ProductPatch};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
    orders: Vec<Order>,
    documents: Vec<Document>,
    exporter_profile: Option<ExporterProfile>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reassemble a catalog from persisted collections.
    pub fn from_parts(
        products: Vec<Product>,
        orders: Vec<Order>,
        documents: Vec<Document>,
        exporter_profile: Option<ExporterProfile>,
    ) -> Self {
        Self {
            products,
            orders,
            documents,
            exporter_profile,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn exporter_profile(&self) -> Option<&ExporterProfile> {
        self.exporter_profile.as_ref()
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn add_product(&mut self, product: Product) {
        debug!(id = %product.id, name = %product.name, "Adding product");
        self.products.push(product);
    }

    /// Apply a partial update to the product with `id`.
    ///
    /// An absent id is deliberately a silent no-op; callers that care check
    /// for the product first. Invalid patch values do surface as errors.
    pub fn update_product(&mut self, id: ProductId, patch: ProductPatch) -> CoreResult<()> {
        match self.products.iter_mut().find(|p| p.id == id) {
            Some(product) => product.apply(patch),
            None => {
                debug!(%id, "Update for unknown product ignored");
                Ok(())
            }
        }
    }

    /// Remove a product from the catalog. Orders keep their embedded
    /// snapshot and documents keep their (now dangling) product reference.
    pub fn delete_product(&mut self, id: ProductId) {
        self.products.retain(|p| p.id != id);
    }

    pub fn add_order(&mut self, order: Order) {
        debug!(id = %order.id, total = order.total_amount, "Adding order");
        self.orders.push(order);
    }

    /// Advance an order's status. Same absent-id policy as
    /// [`Catalog::update_product`]: a silent no-op. Regressions surface as
    /// validation errors.
    pub fn update_order_status(&mut self, id: OrderId, status: OrderStatus) -> CoreResult<()> {
        match self.orders.iter_mut().find(|o| o.id == id) {
            Some(order) => order.advance(status),
            None => {
                debug!(%id, "Status update for unknown order ignored");
                Ok(())
            }
        }
    }

    pub fn set_exporter_profile(&mut self, profile: ExporterProfile) {
        // Last write wins.
        self.exporter_profile = Some(profile);
    }

    pub fn add_document(&mut self, document: Document) {
        self.documents.push(document);
    }

    /// Assemble and record one document for a product.
    ///
    /// Requires the exporter profile to have been set at least once; fails
    /// without appending anything otherwise. Each call appends a new record,
    /// even for identical inputs (the document log is append-only).
    pub fn generate_document(
        &mut self,
        kind: DocumentKind,
        product_id: ProductId,
    ) -> CoreResult<&Document> {
        let exporter = self.exporter_profile.as_ref().ok_or_else(|| {
            CoreError::precondition("exporter profile must be set before generating documents")
        })?;
        let product = self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CoreError::not_found(format!("product {product_id}")))?;

        let content = assemble(kind, product, exporter);
        let document = Document {
            id: DocumentId::new(),
            kind,
            product_id,
            generated_at: Utc::now(),
            content,
        };
        debug!(id = %document.id, %kind, %product_id, "Generated document");
        let slot = self.documents.len();
        self.documents.push(document);
        Ok(&self.documents[slot])
    }
}
