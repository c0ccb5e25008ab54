//! Catalog Item Model

use serde::{Deserialize, Serialize};

/// Sellable document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub category: String,
    /// Subsection key (e.g. `video`)
    pub sub: String,
    /// Subsection display name
    pub sub_name: String,
    pub title: String,
    /// Price in the smallest currency unit
    pub price: i64,
    /// Stored document reference (`/uploads/<file>`), absent for seeded items
    pub file_path: Option<String>,
}

/// Subsection reference entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    pub key: String,
    pub name: String,
}

/// Fixed reference lists returned by `GET /api/catalog`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogInfo {
    pub categories: Vec<String>,
    pub subs: Vec<Subsection>,
}

/// Item list filter (exact match, both given = AND)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemQuery {
    pub category: Option<String>,
    pub sub: Option<String>,
}

/// Admin upload fields (the file itself is handled by the HTTP layer)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCreate {
    pub category: Option<String>,
    pub sub: Option<String>,
    pub title: Option<String>,
    /// Raw price field; absent or non-numeric falls back to a random price
    pub price: Option<String>,
    pub file_path: Option<String>,
}
