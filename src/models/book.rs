//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub code: String,
    pub title: String,
    pub author: String,
    pub stock: i32,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Please provide all required fields"))]
    pub code: String,
    #[validate(length(min = 1, message = "Please provide all required fields"))]
    pub title: String,
    #[validate(length(min = 1, message = "Please provide all required fields"))]
    pub author: String,
    #[validate(range(min = 0, message = "Stock must be greater than or equal to 0"))]
    pub stock: i32,
}

/// Partial book update request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    pub code: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub stock: Option<i32>,
}
