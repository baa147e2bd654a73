//! `jobrecon-engine`: job cost reconciliation between an external export
//! and an internal database export.
//!
//! Pure engine crate: receives source text, returns loaded job maps,
//! discrepancies and rollups. No CLI or file IO.

pub mod aggregate;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod ids;
pub mod loader;
pub mod model;
pub mod money;

pub use compare::{compare_jobs, CompareOptions};
pub use config::JobReconConfig;
pub use engine::run;
pub use error::ReconError;
pub use loader::load_source;
pub use model::{Discrepancy, DiscrepancyKind, JobMap, JobRecord, LoadedSource, ReconReport};
