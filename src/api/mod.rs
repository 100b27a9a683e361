//! API handlers for Libraria REST endpoints

pub mod books;
pub mod borrowings;
pub mod health;
pub mod members;
pub mod openapi;

use serde::Serialize;
use utoipa::ToSchema;

/// Uniform response envelope
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// "success" or "fail"
    pub status: String,
    /// Human-readable outcome message
    pub message: String,
    /// Payload, omitted when there is none
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }

    /// Success envelope without a payload
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data: None,
        }
    }
}
