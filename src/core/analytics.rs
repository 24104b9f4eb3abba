//! Derived metrics over the current catalog snapshot.
//!
//! Pure aggregation: nothing here mutates the catalog.

use std::collections::{HashMap, HashSet};

use crate::core::catalog::Catalog;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticsSummary {
    pub total_products: usize,
    /// Distinct destination countries, case-sensitive exact match.
    pub countries_served: usize,
    /// Arithmetic mean of the products' duty-rate percentages; 0 when the
    /// catalog is empty.
    pub avg_duty_rate: f64,
    /// Proxy ratio of generated documents to product count, capped at 100.
    /// Not an audited compliance measure.
    pub compliance_score: f64,
}

pub fn summarize(catalog: &Catalog) -> AnalyticsSummary {
    let products = catalog.products();
    let total_products = products.len();

    let countries_served = products
        .iter()
        .map(|p| p.destination_country.as_str())
        .collect::<HashSet<_>>()
        .len();

    let avg_duty_rate = if products.is_empty() {
        0.0
    } else {
        products.iter().map(|p| p.duty_rate.percent()).sum::<f64>() / total_products as f64
    };

    let documents = catalog.documents().len();
    let compliance_score = if documents > 0 {
        f64::min(
            100.0,
            documents as f64 / total_products.max(1) as f64 * 100.0,
        )
    } else {
        0.0
    };

    AnalyticsSummary {
        total_products,
        countries_served,
        avg_duty_rate,
        compliance_score,
    }
}

/// Duty rate per destination country, in first-seen country order.
///
/// Each additional product folds in as `(old + new) / 2`, a pairwise
/// average, not a cumulative mean for three or more products. This matches
/// the long-standing dashboard output and is kept as the contract.
pub fn duty_rate_by_country(catalog: &Catalog) -> Vec<(String, f64)> {
    let mut order: Vec<String> = Vec::new();
    let mut rates: HashMap<String, f64> = HashMap::new();

    for product in catalog.products() {
        let country = product.destination_country.clone();
        let rate = product.duty_rate.percent();
        match rates.get_mut(&country) {
            Some(existing) => *existing = (*existing + rate) / 2.0,
            None => {
                rates.insert(country.clone(), rate);
                order.push(country);
            }
        }
    }

    order
        .into_iter()
        .map(|country| {
            let rate = rates[&country];
            (country, rate)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::DocumentKind;
    use crate::core::exporter::ExporterProfile;
    use crate::core::id::ProductId;
    use crate::core::product::{Product, ProductDraft};
    use chrono::Utc;

    fn add_product(catalog: &mut Catalog, country: &str, rate: &str) -> ProductId {
        let id = ProductId::new();
        catalog.add_product(
            Product::new(
                id,
                ProductDraft {
                    name: format!("Goods for {country}"),
                    hs_code: "610910".to_string(),
                    duty_rate: rate.parse().unwrap(),
                    base_price: 10.0,
                    destination_country: country.to_string(),
                    incentive_info: String::new(),
                },
                Utc::now(),
            )
            .unwrap(),
        );
        id
    }

    #[test]
    fn test_empty_catalog_yields_zeros() {
        let summary = summarize(&Catalog::new());
        assert_eq!(summary.total_products, 0);
        assert_eq!(summary.countries_served, 0);
        assert_eq!(summary.avg_duty_rate, 0.0);
        assert_eq!(summary.compliance_score, 0.0);
    }

    #[test]
    fn test_counts_and_average() {
        let mut catalog = Catalog::new();
        add_product(&mut catalog, "USA", "10%");
        add_product(&mut catalog, "USA", "20%");
        add_product(&mut catalog, "Germany", "6%");

        let summary = summarize(&catalog);
        assert_eq!(summary.total_products, 3);
        assert_eq!(summary.countries_served, 2);
        assert!((summary.avg_duty_rate - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_country_match_is_case_sensitive() {
        let mut catalog = Catalog::new();
        add_product(&mut catalog, "usa", "10%");
        add_product(&mut catalog, "USA", "10%");
        assert_eq!(summarize(&catalog).countries_served, 2);
    }

    #[test]
    fn test_compliance_score_caps_at_100() {
        let mut catalog = Catalog::new();
        let id = add_product(&mut catalog, "USA", "10%");
        catalog.set_exporter_profile(ExporterProfile {
            iec: String::new(),
            ad_code: String::new(),
            gst_lut: String::new(),
            pan: String::new(),
            company_name: "X".to_string(),
            company_address: "Y".to_string(),
        });
        for _ in 0..3 {
            catalog
                .generate_document(DocumentKind::CommercialInvoice, id)
                .unwrap();
        }
        assert_eq!(summarize(&catalog).compliance_score, 100.0);
    }

    #[test]
    fn test_duty_by_country_uses_pairwise_average() {
        let mut catalog = Catalog::new();
        add_product(&mut catalog, "USA", "10%");
        add_product(&mut catalog, "USA", "20%");
        add_product(&mut catalog, "USA", "30%");

        // ((10 + 20) / 2 + 30) / 2 = 22.5, not the cumulative mean 20.
        let rates = duty_rate_by_country(&catalog);
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].0, "USA");
        assert!((rates[0].1 - 22.5).abs() < 1e-9);
    }

    #[test]
    fn test_duty_by_country_keeps_first_seen_order() {
        let mut catalog = Catalog::new();
        add_product(&mut catalog, "Japan", "4%");
        add_product(&mut catalog, "Brazil", "14%");
        add_product(&mut catalog, "Japan", "6%");

        let rates = duty_rate_by_country(&catalog);
        let countries: Vec<_> = rates.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(countries, ["Japan", "Brazil"]);
        assert!((rates[0].1 - 5.0).abs() < 1e-9);
    }
}
