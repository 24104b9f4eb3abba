//! Domain core: entities, the catalog store, computation engines and the
//! classification staging workflow. No IO happens in this module tree.

pub mod analytics;
pub mod catalog;
pub mod classify;
pub mod document;
pub mod error;
pub mod exporter;
pub mod id;
pub mod order;
pub mod pricing;
pub mod product;

pub use analytics::{AnalyticsSummary, duty_rate_by_country, summarize};
pub use catalog::Catalog;
pub use classify::{
    ChatMessage, ChatRole, Classification, ClassificationSession, Classifier, QueryTicket,
    StagingState,
};
pub use document::{ContentRecord, Document, DocumentKind, Renderer};
pub use error::{CoreError, CoreResult};
pub use exporter::ExporterProfile;
pub use id::{DocumentId, MessageId, OrderId, ProductId};
pub use order::{Order, OrderStatus, ShippingTerm};
pub use pricing::{OrderTotals, compute_order_totals};
pub use product::{DutyRate, Product, ProductDraft, ProductPatch};
