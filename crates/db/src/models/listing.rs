//! Listing ("announcement") entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kitab_core::types::{DbId, Timestamp};

/// A row from the `listings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Listing {
    pub id: DbId,
    pub seller_id: DbId,
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    /// Canonical string form of `kitab_core::listing::DeclaredCondition`.
    pub declared_condition: String,
    /// Canonical string form of `kitab_core::listing::ListingStatus`.
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Columns for inserting a new listing.
#[derive(Debug)]
pub struct NewListing {
    pub seller_id: DbId,
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub declared_condition: String,
}

/// DTO for updating a listing; `None` fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateListing {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub declared_condition: Option<String>,
}

/// Filters for the listing index query. All fields combine with AND.
#[derive(Debug, Default)]
pub struct ListingFilter {
    pub status: Option<String>,
    pub seller_id: Option<DbId>,
    /// Case-insensitive substring match on title or author.
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}
