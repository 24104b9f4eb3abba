//! Crosswise: product classification, landed-cost estimates and export
//! paperwork for small exporters.
//!
//! The domain lives in [`core`]; [`providers`] holds the external
//! collaborators, [`store`] the durable catalog, and [`cli`] the thin
//! presentation layer.

pub mod cli;
pub mod config;
pub mod core;
pub mod log;
pub mod providers;
pub mod store;
