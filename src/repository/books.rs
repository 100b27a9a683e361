//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Check if a book with the given code already exists
    pub async fn code_exists(&self, code: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE code = $1)")
                .bind(code)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// List books that are not currently out on loan
    pub async fn list_available(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT b.*
            FROM books b
            WHERE NOT EXISTS (
                SELECT 1 FROM borrowings br
                WHERE br.book_id = b.id AND br.returned_at IS NULL
            )
            ORDER BY b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Create a new book
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (code, title, author, stock)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&book.code)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Partially update an existing book
    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        let mut sets = Vec::new();
        let mut param_idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, param_idx));
                    param_idx += 1;
                }
            };
        }

        add_field!(book.code, "code");
        add_field!(book.title, "title");
        add_field!(book.author, "author");
        add_field!(book.stock, "stock");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!("UPDATE books SET {} WHERE id = {}", sets.join(", "), id);

        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(book.code);
        bind_field!(book.title);
        bind_field!(book.author);
        bind_field!(book.stock);

        builder.execute(&self.pool).await?;

        self.get_by_id(id).await
    }

    /// Delete a book. Refused while the book has an open borrowing.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get_by_id(id).await?;

        let open_borrowings: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrowings WHERE book_id = $1 AND returned_at IS NULL",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if open_borrowings > 0 {
            return Err(AppError::BusinessRule(
                "Book is currently borrowed and cannot be deleted".to_string(),
            ));
        }

        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
