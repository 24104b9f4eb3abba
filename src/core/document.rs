//! Export document kinds, assembled content and the render seam.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::core::error::{CoreError, CoreResult};
use crate::core::exporter::ExporterProfile;
use crate::core::id::{DocumentId, ProductId};
use crate::core::product::Product;

/// The closed set of export documents the assembler knows how to populate.
/// The snake_case identifiers are stable and used on the wire and in
/// persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    CommercialInvoice,
    PackingList,
    ShippingBill,
    LetterOfUndertaking,
    CertificateOfOrigin,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::CommercialInvoice,
        DocumentKind::PackingList,
        DocumentKind::ShippingBill,
        DocumentKind::LetterOfUndertaking,
        DocumentKind::CertificateOfOrigin,
    ];

    /// Human-readable label for tables and prompts.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::CommercialInvoice => "Commercial Invoice",
            DocumentKind::PackingList => "Packing List",
            DocumentKind::ShippingBill => "Shipping Bill",
            DocumentKind::LetterOfUndertaking => "Letter of Undertaking",
            DocumentKind::CertificateOfOrigin => "Certificate of Origin",
        }
    }
}

impl Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DocumentKind::CommercialInvoice => "commercial_invoice",
                DocumentKind::PackingList => "packing_list",
                DocumentKind::ShippingBill => "shipping_bill",
                DocumentKind::LetterOfUndertaking => "letter_of_undertaking",
                DocumentKind::CertificateOfOrigin => "certificate_of_origin",
            }
        )
    }
}

impl FromStr for DocumentKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "commercial_invoice" => Ok(DocumentKind::CommercialInvoice),
            "packing_list" => Ok(DocumentKind::PackingList),
            "shipping_bill" => Ok(DocumentKind::ShippingBill),
            "letter_of_undertaking" => Ok(DocumentKind::LetterOfUndertaking),
            "certificate_of_origin" => Ok(DocumentKind::CertificateOfOrigin),
            _ => Err(CoreError::validation(format!(
                "unknown document kind: {s:?}"
            ))),
        }
    }
}

/// Everything an external renderer needs to lay out a document: the full
/// product and exporter snapshots plus the requested kind. No computation
/// happens here beyond what the product already carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub kind: DocumentKind,
    pub product: Product,
    pub exporter: ExporterProfile,
}

/// A generated document. Append-only: there are no update or delete
/// operations. `product_id` is a weak reference; the product may be deleted
/// later without touching this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub kind: DocumentKind,
    pub product_id: ProductId,
    pub generated_at: DateTime<Utc>,
    pub content: ContentRecord,
}

/// Assemble the content record for one document kind.
pub fn assemble(kind: DocumentKind, product: &Product, exporter: &ExporterProfile) -> ContentRecord {
    ContentRecord {
        kind,
        product: product.clone(),
        exporter: exporter.clone(),
    }
}

/// External renderer collaborator. Consumes an assembled content record and
/// an order-quantity override; the byte format it produces is its own
/// business.
pub trait Renderer: Send + Sync {
    fn render(&self, record: &ContentRecord, quantity: u32) -> CoreResult<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_identifiers_are_stable() {
        for kind in DocumentKind::ALL {
            let round_tripped: DocumentKind = kind.to_string().parse().unwrap();
            assert_eq!(kind, round_tripped);
        }
        assert_eq!(
            DocumentKind::LetterOfUndertaking.to_string(),
            "letter_of_undertaking"
        );
        assert!("pro_forma_invoice".parse::<DocumentKind>().is_err());
    }

    #[test]
    fn test_kind_serde_uses_snake_case() {
        let json = serde_json::to_string(&DocumentKind::CertificateOfOrigin).unwrap();
        assert_eq!(json, "\"certificate_of_origin\"");
    }
}
