//! Headless page rendering for consent audits.
//!
//! Provides the [`PageRenderer`] seam consumed by the detection pipeline
//! and a chromiumoxide-backed engine with bounded navigation and
//! readiness waits and scoped browsing-context cleanup.

pub mod engine;
pub mod error;
pub mod meta;
pub mod renderer;

pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
pub use meta::collect_meta_tags;
pub use renderer::{extract_domain, MetaTag, PageRenderer, RenderedPage};
