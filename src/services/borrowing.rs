//! Borrowing workflow service
//!
//! Eligibility checks run in a fixed order before the mutation; the first
//! failure short-circuits with its own status and message. The store then
//! re-validates every guard inside the write transaction, so concurrent
//! borrows of the last copy cannot both succeed.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        borrowing::{Borrowing, PENALTY_DAYS},
        member::MAX_BOOKS_BORROWED,
    },
    repository::BorrowingStore,
};

#[derive(Clone)]
pub struct BorrowingService {
    store: Arc<dyn BorrowingStore>,
}

impl BorrowingService {
    pub fn new(store: Arc<dyn BorrowingStore>) -> Self {
        Self { store }
    }

    /// Borrow a book for a member.
    ///
    /// Check order: member exists, member not penalized, member under the
    /// borrow cap, book exists with stock, book not already out.
    pub async fn borrow(&self, member_id: i32, book_id: i32) -> AppResult<Borrowing> {
        let member = self
            .store
            .find_member(member_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

        if member.penalty {
            return Err(AppError::Forbidden(
                "Member is currently penalized and cannot borrow books".to_string(),
            ));
        }

        if member.books_borrowed >= MAX_BOOKS_BORROWED {
            return Err(AppError::BusinessRule(
                "Member may not borrow more than 2 books at a time".to_string(),
            ));
        }

        match self.store.find_book(book_id).await? {
            Some(book) if book.stock > 0 => {}
            _ => {
                return Err(AppError::NotFound(
                    "Book not available or out of stock".to_string(),
                ))
            }
        }

        if self.store.has_open_borrowing_for_book(book_id).await? {
            return Err(AppError::BusinessRule(
                "This book is currently borrowed by another member".to_string(),
            ));
        }

        let borrowing = self
            .store
            .create_borrowing(member_id, book_id, Utc::now())
            .await?;

        tracing::info!(member_id, book_id, borrowing_id = borrowing.id, "book borrowed");

        Ok(borrowing)
    }

    /// Return a borrowed book.
    ///
    /// A late return (strictly more than 7 elapsed days) flags the member
    /// as penalized for 3 days before the borrowing is closed. The penalty
    /// write is deliberately separate from the closing transaction.
    pub async fn return_book(&self, member_id: i32, book_id: i32) -> AppResult<Borrowing> {
        let mut open = self.store.open_borrowings_for(member_id, book_id).await?;

        let borrowing = match open.len() {
            0 => {
                return Err(AppError::BusinessRule(
                    "This book was not borrowed by the member or has already been returned."
                        .to_string(),
                ))
            }
            1 => open.remove(0),
            n => {
                // The store's partial unique index makes this unreachable;
                // refuse to silently close multiple rows against a single
                // counter adjustment.
                return Err(AppError::Internal(format!(
                    "found {} open borrowings for member {} and book {}, expected at most one",
                    n, member_id, book_id
                )));
            }
        };

        let now = Utc::now();

        if borrowing.is_late(now) {
            let penalty_end = now + Duration::days(PENALTY_DAYS);
            self.store.apply_penalty(member_id, penalty_end).await?;
            tracing::info!(member_id, book_id, %penalty_end, "late return, member penalized");
        }

        let closed = self.store.close_borrowing(borrowing.id, now).await?;

        tracing::info!(member_id, book_id, borrowing_id = closed.id, "book returned");

        Ok(closed)
    }

    /// List every borrowing record, open and closed
    pub async fn list_all(&self) -> AppResult<Vec<Borrowing>> {
        self.store.list_borrowings().await
    }
}
