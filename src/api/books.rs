//! Book (catalog) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, UpdateBook},
};

use super::ApiResponse;

/// Add a new book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book added", body = ApiResponse<Book>),
        (status = 400, description = "Missing fields, invalid stock or duplicate code")
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<ApiResponse<Book>>)> {
    let created = state.services.catalog.add_book(book).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Book added successfully", created)),
    ))
}

/// List books available for borrowing
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Books not currently out on loan", body = ApiResponse<Vec<Book>>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ApiResponse<Vec<Book>>>> {
    let books = state.services.catalog.list_books().await?;

    Ok(Json(ApiResponse::success(
        "Book retrieved successfully",
        books,
    )))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = ApiResponse<Book>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let book = state.services.catalog.get_book(id).await?;

    Ok(Json(ApiResponse::success(
        "Book retrieved successfully",
        book,
    )))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = ApiResponse<Book>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(book): Json<UpdateBook>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let updated = state.services.catalog.update_book(id, book).await?;

    Ok(Json(ApiResponse::success(
        "Book updated successfully",
        updated,
    )))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 400, description = "Book is currently borrowed"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Book>>> {
    state.services.catalog.delete_book(id).await?;

    Ok(Json(ApiResponse::message_only("Book deleted successfully")))
}
