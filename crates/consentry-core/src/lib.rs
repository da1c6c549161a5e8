//! Core types and configuration shared across the Consentry workspace.
//!
//! This crate defines the domain model for consent audits (detected signals,
//! per-URL results, scan sessions and their listing summaries), the central
//! error type, and TOML-based application configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{ConfigError, ConfigResult, ConsentryError, Result};
pub use types::{
    ConsentVersion, PageSignals, ScanKind, ScanSession, SessionSummary, UrlScanResult,
    CMS_NOT_DETECTED, META_NOT_FOUND,
};
