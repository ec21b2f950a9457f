//! Error types for catalog loading.
//!
//! Request-time operations never fail; only building a catalog can.

use thiserror::Error;

use crate::types::NeedCategory;

/// Result type for catalog loading.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Catalog load and validation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Seed file could not be read
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// Seed JSON is malformed or has the wrong shape
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record has an empty name
    #[error("Resource #{index} in {region}/{category} has an empty name")]
    EmptyName {
        region: String,
        category: NeedCategory,
        index: usize,
    },

    /// A record has a negative or non-finite distance
    #[error("Resource '{name}' in {region}/{category} has invalid distance {distance}")]
    InvalidDistance {
        region: String,
        category: NeedCategory,
        name: String,
        distance: f64,
    },

    /// A category is present but holds no records
    #[error("Category {region}/{category} has no resources")]
    EmptyCategory {
        region: String,
        category: NeedCategory,
    },

    /// Seed data uses the category reserved for fallback resources
    #[error("Region {region} uses the reserved 'general' category")]
    ReservedCategory { region: String },

    /// An alias points at a region/category with no data of its own
    #[error("Alias {region}/{category} -> {target} has no target data")]
    DanglingAlias {
        region: String,
        category: NeedCategory,
        target: String,
    },

    /// An alias would replace a list the region already owns
    #[error("Alias {region}/{category} shadows the region's own resources")]
    ShadowingAlias {
        region: String,
        category: NeedCategory,
    },
}
