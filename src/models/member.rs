//! Member model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Number of books a member may hold at the same time
pub const MAX_BOOKS_BORROWED: i32 = 2;

/// Member model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i32,
    pub code: String,
    pub name: String,
    /// Count of currently-open borrowings, kept in lockstep with the
    /// borrowings table
    pub books_borrowed: i32,
    pub penalty: bool,
    pub penalty_end_date: Option<DateTime<Utc>>,
}

/// Create member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMember {
    #[validate(length(min = 1, message = "Please provide all required fields"))]
    pub code: String,
    #[validate(length(min = 1, message = "Please provide all required fields"))]
    pub name: String,
}

/// Partial member update request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMember {
    pub code: Option<String>,
    pub name: Option<String>,
    pub penalty: Option<bool>,
    pub penalty_end_date: Option<DateTime<Utc>>,
}
