//! Product catalog entries and the duty-rate value type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::core::error::{CoreError, CoreResult};
use crate::core::id::ProductId;

/// Import duty rate, held internally as a percentage.
///
/// Text like `"10%"` exists only at the boundaries (collaborator payloads,
/// CLI arguments, display); everything downstream works with the parsed
/// number. The trailing `%` is optional on input and always present on
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DutyRate(f64);

impl DutyRate {
    pub fn from_percent(percent: f64) -> Self {
        Self(percent)
    }

    /// The rate as a percentage, e.g. `10.0` for `"10%"`.
    pub fn percent(&self) -> f64 {
        self.0
    }

    /// The rate as a fraction, e.g. `0.1` for `"10%"`.
    pub fn fraction(&self) -> f64 {
        self.0 / 100.0
    }
}

impl FromStr for DutyRate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        let percent: f64 = number
            .parse()
            .map_err(|_| CoreError::parse(format!("invalid duty rate: {s:?}")))?;
        Ok(Self(percent))
    }
}

impl Display for DutyRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<String> for DutyRate {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DutyRate> for String {
    fn from(value: DutyRate) -> Self {
        value.to_string()
    }
}

/// The attribute set shared by direct entry and confirmed classification
/// candidates. Validated once, inside [`Product::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub hs_code: String,
    pub duty_rate: DutyRate,
    pub base_price: f64,
    pub destination_country: String,
    pub incentive_info: String,
}

/// A classified product in the catalog.
///
/// `total_price` is derived: `base_price * (1 + duty_rate_fraction)`. It is
/// recomputed on every mutation that touches `base_price` or `duty_rate`,
/// never stored independently of its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub hs_code: String,
    pub duty_rate: DutyRate,
    pub base_price: f64,
    pub destination_country: String,
    pub incentive_info: String,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
}

fn validate_hs_code(hs_code: &str) -> CoreResult<()> {
    let len = hs_code.len();
    if !(6..=8).contains(&len) || !hs_code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::validation(format!(
            "HS code must be 6-8 digits, got {hs_code:?}"
        )));
    }
    Ok(())
}

impl Product {
    pub fn new(id: ProductId, draft: ProductDraft, created_at: DateTime<Utc>) -> CoreResult<Self> {
        if draft.name.trim().is_empty() {
            return Err(CoreError::validation("product name must not be empty"));
        }
        validate_hs_code(&draft.hs_code)?;
        if draft.base_price < 0.0 || !draft.base_price.is_finite() {
            return Err(CoreError::validation(format!(
                "base price must be a non-negative number, got {}",
                draft.base_price
            )));
        }
        if draft.destination_country.trim().is_empty() {
            return Err(CoreError::validation(
                "destination country must not be empty",
            ));
        }

        let total_price = derive_total_price(draft.base_price, draft.duty_rate);
        Ok(Self {
            id,
            name: draft.name,
            hs_code: draft.hs_code,
            duty_rate: draft.duty_rate,
            base_price: draft.base_price,
            destination_country: draft.destination_country,
            incentive_info: draft.incentive_info,
            total_price,
            created_at,
        })
    }

    /// Apply a partial update, re-validating touched fields and recomputing
    /// the derived total price. Validation failure leaves the product
    /// unchanged.
    pub fn apply(&mut self, patch: ProductPatch) -> CoreResult<()> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(CoreError::validation("product name must not be empty"));
            }
        }
        if let Some(hs_code) = &patch.hs_code {
            validate_hs_code(hs_code)?;
        }
        if let Some(price) = patch.base_price {
            if price < 0.0 || !price.is_finite() {
                return Err(CoreError::validation(format!(
                    "base price must be a non-negative number, got {price}"
                )));
            }
        }
        if let Some(country) = &patch.destination_country {
            if country.trim().is_empty() {
                return Err(CoreError::validation(
                    "destination country must not be empty",
                ));
            }
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(hs_code) = patch.hs_code {
            self.hs_code = hs_code;
        }
        if let Some(rate) = patch.duty_rate {
            self.duty_rate = rate;
        }
        if let Some(price) = patch.base_price {
            self.base_price = price;
        }
        if let Some(country) = patch.destination_country {
            self.destination_country = country;
        }
        if let Some(info) = patch.incentive_info {
            self.incentive_info = info;
        }

        self.total_price = derive_total_price(self.base_price, self.duty_rate);
        Ok(())
    }
}

fn derive_total_price(base_price: f64, duty_rate: DutyRate) -> f64 {
    base_price * (1.0 + duty_rate.fraction())
}

/// Partial update for [`Product`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub hs_code: Option<String>,
    pub duty_rate: Option<DutyRate>,
    pub base_price: Option<f64>,
    pub destination_country: Option<String>,
    pub incentive_info: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn draft(name: &str, country: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            hs_code: "610910".to_string(),
            duty_rate: "10%".parse().unwrap(),
            base_price: 100.0,
            destination_country: country.to_string(),
            incentive_info: String::new(),
        }
    }

    #[test]
    fn test_duty_rate_parsing() {
        assert_eq!("10%".parse::<DutyRate>().unwrap().percent(), 10.0);
        assert_eq!("7.5 %".parse::<DutyRate>().unwrap().percent(), 7.5);
        assert_eq!("12".parse::<DutyRate>().unwrap().fraction(), 0.12);
        assert!("free".parse::<DutyRate>().is_err());
        assert!("".parse::<DutyRate>().is_err());
    }

    #[test]
    fn test_duty_rate_display_keeps_percent_suffix() {
        let rate: DutyRate = "10".parse().unwrap();
        assert_eq!(rate.to_string(), "10%");
    }

    #[test]
    fn test_total_price_derived_on_creation() {
        let product = Product::new(ProductId::new(), draft("T-shirts", "USA"), Utc::now()).unwrap();
        assert_eq!(product.total_price, 110.0);
    }

    #[test]
    fn test_total_price_recomputed_on_update() {
        let mut product =
            Product::new(ProductId::new(), draft("T-shirts", "USA"), Utc::now()).unwrap();

        product
            .apply(ProductPatch {
                base_price: Some(200.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(product.total_price, 220.0);

        product
            .apply(ProductPatch {
                duty_rate: Some("25%".parse().unwrap()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(product.total_price, 250.0);
    }

    #[test]
    fn test_rejects_bad_hs_code() {
        let mut d = draft("T-shirts", "USA");
        d.hs_code = "61091".to_string(); // 5 digits
        assert!(Product::new(ProductId::new(), d, Utc::now()).is_err());

        let mut d = draft("T-shirts", "USA");
        d.hs_code = "6109AB".to_string();
        assert!(Product::new(ProductId::new(), d, Utc::now()).is_err());
    }

    #[test]
    fn test_rejects_empty_name_and_negative_price() {
        let d = draft("  ", "USA");
        assert!(Product::new(ProductId::new(), d, Utc::now()).is_err());

        let mut d = draft("T-shirts", "USA");
        d.base_price = -1.0;
        assert!(Product::new(ProductId::new(), d, Utc::now()).is_err());
    }

    #[test]
    fn test_patch_validation_failure_leaves_product_usable() {
        let mut product =
            Product::new(ProductId::new(), draft("T-shirts", "USA"), Utc::now()).unwrap();
        let err = product.apply(ProductPatch {
            hs_code: Some("bad".to_string()),
            ..Default::default()
        });
        assert!(err.is_err());
        assert_eq!(product.hs_code, "610910");
    }
}
