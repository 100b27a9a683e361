//! Borrowing (loan) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Days after which a return is considered late
pub const LATE_RETURN_DAYS: i64 = 7;

/// Days a penalized member is barred from borrowing
pub const PENALTY_DAYS: i64 = 3;

/// Borrowing record from database. `returned_at = NULL` means the book
/// is currently out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Borrowing {
    pub id: i32,
    pub member_id: i32,
    pub book_id: i32,
    pub borrowed_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl Borrowing {
    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }

    /// Whether returning at `now` incurs a penalty (strictly more than
    /// `LATE_RETURN_DAYS` of elapsed time, calendar-independent)
    pub fn is_late(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.borrowed_at) > chrono::Duration::days(LATE_RETURN_DAYS)
    }
}

/// Borrow request body
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    pub member_id: i32,
    pub book_id: i32,
}
