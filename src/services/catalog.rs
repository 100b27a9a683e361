//! Catalog management service for books and members

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook, UpdateBook},
        member::{CreateMember, Member, UpdateMember},
    },
    repository::Repository,
};

/// First human-readable message out of a validator error set
fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid input".to_string())
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book after field validation and code uniqueness check
    pub async fn add_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;

        if self.repository.books.code_exists(&book.code).await? {
            return Err(AppError::Conflict(
                "Book with this code already exists.".to_string(),
            ));
        }

        self.repository.books.create(&book).await
    }

    /// List available books (catalog minus currently-borrowed books)
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_available().await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Partial update, store-level constraints only
    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await?;
        self.repository.books.update(id, &book).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// Add a member after field validation and code uniqueness check
    pub async fn add_member(&self, member: CreateMember) -> AppResult<Member> {
        member
            .validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;

        if self.repository.members.code_exists(&member.code).await? {
            return Err(AppError::Conflict(
                "Member with this code already exists.".to_string(),
            ));
        }

        self.repository.members.create(&member).await
    }

    pub async fn list_members(&self) -> AppResult<Vec<Member>> {
        self.repository.members.list().await
    }

    pub async fn get_member(&self, id: i32) -> AppResult<Member> {
        self.repository.members.get_by_id(id).await
    }

    pub async fn update_member(&self, id: i32, member: UpdateMember) -> AppResult<Member> {
        self.repository.members.get_by_id(id).await?;
        self.repository.members.update(id, &member).await
    }

    pub async fn delete_member(&self, id: i32) -> AppResult<()> {
        self.repository.members.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_book_validation_catches_missing_fields() {
        let book = CreateBook {
            code: String::new(),
            title: "Harry Potter".to_string(),
            author: "J.K Rowling".to_string(),
            stock: 1,
        };
        let errors = book.validate().unwrap_err();
        assert_eq!(
            validation_message(&errors),
            "Please provide all required fields"
        );
    }

    #[test]
    fn create_book_validation_rejects_negative_stock() {
        let book = CreateBook {
            code: "JK-45".to_string(),
            title: "Harry Potter".to_string(),
            author: "J.K Rowling".to_string(),
            stock: -1,
        };
        let errors = book.validate().unwrap_err();
        assert_eq!(
            validation_message(&errors),
            "Stock must be greater than or equal to 0"
        );
    }

    #[test]
    fn create_book_accepts_zero_stock() {
        let book = CreateBook {
            code: "JK-45".to_string(),
            title: "Harry Potter".to_string(),
            author: "J.K Rowling".to_string(),
            stock: 0,
        };
        assert!(book.validate().is_ok());
    }

    #[test]
    fn create_member_validation_catches_missing_fields() {
        let member = CreateMember {
            code: "M001".to_string(),
            name: String::new(),
        };
        assert!(member.validate().is_err());
    }
}
