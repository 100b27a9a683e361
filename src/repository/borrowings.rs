//! Borrowings repository for database operations
//!
//! The borrowing workflow goes through the [`BorrowingStore`] trait so the
//! service layer can be exercised against test doubles. The Postgres
//! implementation performs the borrow and return mutations as single
//! transactions whose writes re-validate every eligibility guard, closing
//! the window between the service-level reads and the commit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::Book,
        borrowing::Borrowing,
        member::{Member, MAX_BOOKS_BORROWED},
    },
};

/// Partial unique index guaranteeing at most one open borrowing per book
const ONE_OPEN_PER_BOOK: &str = "borrowings_one_open_per_book";

/// Storage operations needed by the borrowing workflow
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowingStore: Send + Sync {
    async fn find_member(&self, id: i32) -> AppResult<Option<Member>>;

    async fn find_book(&self, id: i32) -> AppResult<Option<Book>>;

    /// Whether the book is currently out, regardless of holder
    async fn has_open_borrowing_for_book(&self, book_id: i32) -> AppResult<bool>;

    /// Open borrowings matching both member and book
    async fn open_borrowings_for(
        &self,
        member_id: i32,
        book_id: i32,
    ) -> AppResult<Vec<Borrowing>>;

    /// Atomically create a borrowing, increment the member's open count and
    /// decrement the book's stock
    async fn create_borrowing(
        &self,
        member_id: i32,
        book_id: i32,
        borrowed_at: DateTime<Utc>,
    ) -> AppResult<Borrowing>;

    /// Atomically close a borrowing, decrement the member's open count and
    /// increment the book's stock
    async fn close_borrowing(
        &self,
        borrowing_id: i32,
        returned_at: DateTime<Utc>,
    ) -> AppResult<Borrowing>;

    /// Flag the member as penalized until the given date
    async fn apply_penalty(&self, member_id: i32, until: DateTime<Utc>) -> AppResult<()>;

    async fn list_borrowings(&self) -> AppResult<Vec<Borrowing>>;
}

#[derive(Clone)]
pub struct BorrowingsRepository {
    pool: Pool<Postgres>,
}

impl BorrowingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowingStore for BorrowingsRepository {
    async fn find_member(&self, id: i32) -> AppResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    async fn find_book(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn has_open_borrowing_for_book(&self, book_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM borrowings WHERE book_id = $1 AND returned_at IS NULL)",
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn open_borrowings_for(
        &self,
        member_id: i32,
        book_id: i32,
    ) -> AppResult<Vec<Borrowing>> {
        let borrowings = sqlx::query_as::<_, Borrowing>(
            r#"
            SELECT * FROM borrowings
            WHERE member_id = $1 AND book_id = $2 AND returned_at IS NULL
            ORDER BY borrowed_at
            "#,
        )
        .bind(member_id)
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(borrowings)
    }

    async fn create_borrowing(
        &self,
        member_id: i32,
        book_id: i32,
        borrowed_at: DateTime<Utc>,
    ) -> AppResult<Borrowing> {
        let mut tx = self.pool.begin().await?;

        // The partial unique index turns a concurrent borrow of the same
        // book into a constraint violation instead of a double grant.
        let borrowing = sqlx::query_as::<_, Borrowing>(
            r#"
            INSERT INTO borrowings (member_id, book_id, borrowed_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(member_id)
        .bind(book_id)
        .bind(borrowed_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some(ONE_OPEN_PER_BOOK) => {
                AppError::BusinessRule(
                    "This book is currently borrowed by another member".to_string(),
                )
            }
            _ => AppError::from(e),
        })?;

        // Conditional writes re-validate the member and stock guards inside
        // the transaction; zero rows affected means a concurrent caller got
        // there first and the whole transaction rolls back.
        let member_updated = sqlx::query(
            r#"
            UPDATE members SET books_borrowed = books_borrowed + 1
            WHERE id = $1 AND penalty = false AND books_borrowed < $2
            "#,
        )
        .bind(member_id)
        .bind(MAX_BOOKS_BORROWED)
        .execute(&mut *tx)
        .await?;

        if member_updated.rows_affected() == 0 {
            // A concurrent writer changed the member after the service
            // pre-checks; re-read inside the transaction to report the
            // rule that actually blocked the borrow.
            let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
                .bind(member_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

            if member.penalty {
                return Err(AppError::Forbidden(
                    "Member is currently penalized and cannot borrow books".to_string(),
                ));
            }
            return Err(AppError::BusinessRule(
                "Member may not borrow more than 2 books at a time".to_string(),
            ));
        }

        let book_updated =
            sqlx::query("UPDATE books SET stock = stock - 1 WHERE id = $1 AND stock > 0")
                .bind(book_id)
                .execute(&mut *tx)
                .await?;

        if book_updated.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "Book not available or out of stock".to_string(),
            ));
        }

        tx.commit().await?;

        Ok(borrowing)
    }

    async fn close_borrowing(
        &self,
        borrowing_id: i32,
        returned_at: DateTime<Utc>,
    ) -> AppResult<Borrowing> {
        let mut tx = self.pool.begin().await?;

        let borrowing = sqlx::query_as::<_, Borrowing>(
            r#"
            UPDATE borrowings SET returned_at = $1
            WHERE id = $2 AND returned_at IS NULL
            RETURNING *
            "#,
        )
        .bind(returned_at)
        .bind(borrowing_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::BusinessRule(
                "This book was not borrowed by the member or has already been returned."
                    .to_string(),
            )
        })?;

        sqlx::query(
            r#"
            UPDATE members SET books_borrowed = books_borrowed - 1
            WHERE id = $1 AND books_borrowed > 0
            "#,
        )
        .bind(borrowing.member_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE books SET stock = stock + 1 WHERE id = $1")
            .bind(borrowing.book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(borrowing)
    }

    async fn apply_penalty(&self, member_id: i32, until: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE members SET penalty = true, penalty_end_date = $1 WHERE id = $2")
            .bind(until)
            .bind(member_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_borrowings(&self) -> AppResult<Vec<Borrowing>> {
        let borrowings = sqlx::query_as::<_, Borrowing>("SELECT * FROM borrowings ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(borrowings)
    }
}
