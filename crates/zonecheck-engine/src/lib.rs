//! Client for the external Zonemaster DNS-diagnostics engine and the
//! normalizer that turns its loosely-typed result entries into findings.

pub mod client;
pub mod error;
pub mod models;
pub mod normalize;

pub use client::{DomainAnalyzer, ZonemasterClient, DEFAULT_TIMEOUT_SECS};
pub use error::{EngineError, Result};
pub use normalize::normalize_findings;
