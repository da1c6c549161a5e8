//! Consentry Scanner - Detection pipeline and scan orchestration.
//!
//! This crate turns rendered pages into structured consent signals,
//! scores them, and runs URL batches with per-URL failure isolation.
//!
//! # Features
//!
//! - Signature-driven detection of CMPs, CMS, tag managers, and pixels
//! - Pure, deterministic compliance scoring
//! - Sequential scanning by default, with opt-in bounded parallelism that
//!   preserves input order
//! - Per-URL failure isolation: a failed render yields an all-sentinel
//!   result row and never aborts the batch
//! - Cancellation of in-flight batches without leaking browsing contexts
//!
//! # Example
//!
//! ```rust,ignore
//! use consentry_scanner::ScanOrchestrator;
//! use tokio_util::sync::CancellationToken;
//!
//! let orchestrator = ScanOrchestrator::new(renderer, history);
//! let (filename, results) = orchestrator
//!     .run_session(&urls, "running shoes", ScanKind::Manual, &CancellationToken::new())
//!     .await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[allow(missing_docs)]
pub mod error;
pub mod orchestrator;
pub mod pipeline;
pub mod score;

// Re-export commonly used types
pub use error::{Result, ScanError};
pub use orchestrator::ScanOrchestrator;
pub use pipeline::analyze;
pub use score::rgpd_score;
