//! Scan-session history store.
//!
//! Persists each [`ScanSession`](consentry_core::ScanSession) as one JSON
//! file keyed by a generated filename (timestamp + slugified query + kind),
//! and serves summary listings over the stored records.
//!
//! # Guarantees
//!
//! - Writes are atomic relative to concurrent readers: records are written
//!   to a temporary file in the store directory and renamed into place, so
//!   no reader ever observes a truncated record.
//! - Mutating and reading operations on the same filename are serialized by
//!   a per-key mutex, so `get` never races a concurrent `delete`.
//! - Listing degrades gracefully: records that fail to parse are skipped
//!   with a warning instead of failing the whole listing.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod filename;
pub mod store;

pub use error::{HistoryError, Result};
pub use filename::{session_filename, slugify};
pub use store::HistoryStore;
