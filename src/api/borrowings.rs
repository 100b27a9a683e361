//! Borrowing workflow endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::borrowing::{BorrowRequest, Borrowing},
};

use super::ApiResponse;

/// Borrow a book for a member
#[utoipa::path(
    post,
    path = "/borrowings",
    tag = "borrowings",
    request_body = BorrowRequest,
    responses(
        (status = 201, description = "Book borrowed", body = ApiResponse<Borrowing>),
        (status = 400, description = "Borrow cap reached or book already out"),
        (status = 403, description = "Member is penalized"),
        (status = 404, description = "Member or book not found / out of stock")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Json(request): Json<BorrowRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Borrowing>>)> {
    let borrowing = state
        .services
        .borrowing
        .borrow(request.member_id, request.book_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Book borrowed successfully.", borrowing)),
    ))
}

/// Return a borrowed book
///
/// The return is keyed by the (member, book) pair in the body; the path
/// segment is accepted for URL shape compatibility but not used to resolve
/// the borrowing.
#[utoipa::path(
    put,
    path = "/borrowings/{id}/return",
    tag = "borrowings",
    params(
        ("id" = i32, Path, description = "Borrowing ID (informational)")
    ),
    request_body = BorrowRequest,
    responses(
        (status = 200, description = "Book returned", body = ApiResponse<Borrowing>),
        (status = 400, description = "Not borrowed or already returned")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(_id): Path<i32>,
    Json(request): Json<BorrowRequest>,
) -> AppResult<Json<ApiResponse<Borrowing>>> {
    let borrowing = state
        .services
        .borrowing
        .return_book(request.member_id, request.book_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Book returned successfully.",
        borrowing,
    )))
}

/// List all borrowing records
#[utoipa::path(
    get,
    path = "/borrowings",
    tag = "borrowings",
    responses(
        (status = 200, description = "All borrowing records", body = ApiResponse<Vec<Borrowing>>)
    )
)]
pub async fn list_borrowings(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ApiResponse<Vec<Borrowing>>>> {
    let borrowings = state.services.borrowing.list_all().await?;

    Ok(Json(ApiResponse::success(
        "Borrowing records retrieved successfully.",
        borrowings,
    )))
}
