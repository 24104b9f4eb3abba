use serde::Serialize;

use crate::core::document::{ContentRecord, Renderer};
use crate::core::error::{CoreError, CoreResult};

/// Renderer that emits the assembled content as pretty-printed JSON.
///
/// Stands in for the external binary renderer; downstream tooling (or a
/// human) can take it from there.
pub struct JsonRenderer;

#[derive(Serialize)]
struct RenderedDocument<'a> {
    #[serde(flatten)]
    record: &'a ContentRecord,
    quantity: u32,
}

impl Renderer for JsonRenderer {
    fn render(&self, record: &ContentRecord, quantity: u32) -> CoreResult<Vec<u8>> {
        serde_json::to_vec_pretty(&RenderedDocument { record, quantity })
            .map_err(|e| CoreError::collaborator(format!("render failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::{DocumentKind, assemble};
    use crate::core::exporter::ExporterProfile;
    use crate::core::id::ProductId;
    use crate::core::product::{Product, ProductDraft};
    use chrono::Utc;

    #[test]
    fn test_render_includes_kind_product_and_quantity() {
        let product = Product::new(
            ProductId::new(),
            ProductDraft {
                name: "Cotton t-shirts".to_string(),
                hs_code: "610910".to_string(),
                duty_rate: "10%".parse().unwrap(),
                base_price: 4.5,
                destination_country: "USA".to_string(),
                incentive_info: String::new(),
            },
            Utc::now(),
        )
        .unwrap();
        let exporter = ExporterProfile {
            iec: "0512345678".to_string(),
            ad_code: "6390005".to_string(),
            gst_lut: "AD090122000123X".to_string(),
            pan: "ABCDE1234F".to_string(),
            company_name: "Meridian Exports".to_string(),
            company_address: "14 Marine Drive, Mumbai".to_string(),
        };
        let record = assemble(DocumentKind::PackingList, &product, &exporter);

        let bytes = JsonRenderer.render(&record, 3).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["kind"], "packing_list");
        assert_eq!(value["quantity"], 3);
        assert_eq!(value["product"]["name"], "Cotton t-shirts");
        assert_eq!(value["exporter"]["company_name"], "Meridian Exports");
    }
}
