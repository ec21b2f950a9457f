//! Local aid resource retrieval for support chat.
//!
//! Given a free-text location and a set of needs, selects and ranks a small
//! set of shelters, food banks, clinics, and career centers from a read-only
//! in-memory catalog, then renders them as a plain-text prompt block.
//!
//! # Example
//!
//! ```rust,ignore
//! use resource_engine::{format_for_prompt, ResourceCatalog, ResourceRetriever};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(ResourceCatalog::seeded()?);
//! let retriever = ResourceRetriever::new(catalog);
//!
//! let result = retriever.retrieve("San Francisco", &["food", "shelter"], Some("family with children"));
//! let prompt_block = format_for_prompt(&result);
//! ```

pub mod catalog;
pub mod error;
pub mod location;
pub mod needs;
pub mod prompt;
pub mod ranking;
pub mod retrieval;
pub mod types;

pub use catalog::ResourceCatalog;
pub use error::{CatalogError, Result};
pub use location::{normalize, normalize_opt};
pub use needs::{classify, extract_needs, matching_categories, DEFAULT_NEED};
pub use prompt::{format_for_prompt, NO_RESOURCES_MESSAGE};
pub use ranking::{RankingWeights, ResourceRanker};
pub use retrieval::{confidence, fallback_resources, ResourceRetriever, RetrievalConfig};
pub use types::*;
