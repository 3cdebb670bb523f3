//! Newborn bilirubin nomogram evaluation.
//!
//! Readings are placed on the Bhutani hour-specific risk chart and checked
//! against the AAP phototherapy and exchange-transfusion thresholds. An
//! [`Infant`](infant::Infant) collects its classified readings and the
//! clinical warnings that follow from them.

pub mod config;
pub mod error;
pub mod infant;
pub mod intake;
pub mod nomogram;
pub mod report;
pub mod telemetry;
