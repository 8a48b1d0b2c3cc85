//! Rating entity models and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use kitab_core::types::{DbId, Timestamp};

/// A row from the `ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub buyer_id: DbId,
    pub seller_id: DbId,
    pub listing_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
    pub communication_rating: Option<i32>,
    pub condition_accuracy_rating: Option<i32>,
    pub delivery_speed_rating: Option<i32>,
    pub created_at: Timestamp,
}

/// Columns for inserting a new rating.
#[derive(Debug)]
pub struct NewRating {
    pub buyer_id: DbId,
    pub seller_id: DbId,
    pub listing_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
    pub communication_rating: Option<i32>,
    pub condition_accuracy_rating: Option<i32>,
    pub delivery_speed_rating: Option<i32>,
}

/// Aggregate rating statistics for a seller, computed in SQL.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SellerStats {
    pub total_ratings: i64,
    pub average_rating: Option<f64>,
    pub avg_communication: Option<f64>,
    pub avg_condition_accuracy: Option<f64>,
    pub avg_delivery_speed: Option<f64>,
    pub rating_5_count: i64,
    pub rating_4_count: i64,
    pub rating_3_count: i64,
    pub rating_2_count: i64,
    pub rating_1_count: i64,
}
