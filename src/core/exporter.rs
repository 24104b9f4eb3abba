//! Exporter company profile.

use serde::{Deserialize, Serialize};

/// Singleton exporter profile stamped onto every assembled document.
/// At most one exists; setting it again replaces the previous value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExporterProfile {
    /// Import-export code.
    pub iec: String,
    /// Bank authorized-dealer code.
    pub ad_code: String,
    /// GST letter-of-undertaking identifier.
    pub gst_lut: String,
    pub pan: String,
    pub company_name: String,
    pub company_address: String,
}
