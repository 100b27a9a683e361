//! Data models for the Libraria domain

pub mod book;
pub mod borrowing;
pub mod member;

pub use book::{Book, CreateBook, UpdateBook};
pub use borrowing::{Borrowing, BorrowRequest};
pub use member::{CreateMember, Member, UpdateMember};
