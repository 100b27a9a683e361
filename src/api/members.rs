//! Member management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::member::{CreateMember, Member, UpdateMember},
};

use super::ApiResponse;

/// Register a new member
#[utoipa::path(
    post,
    path = "/members",
    tag = "members",
    request_body = CreateMember,
    responses(
        (status = 201, description = "Member added", body = ApiResponse<Member>),
        (status = 400, description = "Missing fields or duplicate code")
    )
)]
pub async fn add_member(
    State(state): State<crate::AppState>,
    Json(member): Json<CreateMember>,
) -> AppResult<(StatusCode, Json<ApiResponse<Member>>)> {
    let created = state.services.catalog.add_member(member).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Member added successfully", created)),
    ))
}

/// List all members
#[utoipa::path(
    get,
    path = "/members",
    tag = "members",
    responses(
        (status = 200, description = "All members", body = ApiResponse<Vec<Member>>)
    )
)]
pub async fn list_members(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ApiResponse<Vec<Member>>>> {
    let members = state.services.catalog.list_members().await?;

    Ok(Json(ApiResponse::success(
        "Member retrieved successfully",
        members,
    )))
}

/// Get member details by ID
#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member details", body = ApiResponse<Member>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Member>>> {
    let member = state.services.catalog.get_member(id).await?;

    Ok(Json(ApiResponse::success(
        "Member retrieved successfully",
        member,
    )))
}

/// Update an existing member
#[utoipa::path(
    put,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i32, Path, description = "Member ID")
    ),
    request_body = UpdateMember,
    responses(
        (status = 200, description = "Member updated", body = ApiResponse<Member>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn update_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(member): Json<UpdateMember>,
) -> AppResult<Json<ApiResponse<Member>>> {
    let updated = state.services.catalog.update_member(id, member).await?;

    Ok(Json(ApiResponse::success(
        "Member updated successfully",
        updated,
    )))
}

/// Delete a member
#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member deleted"),
        (status = 400, description = "Member has open borrowings"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn delete_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Member>>> {
    state.services.catalog.delete_member(id).await?;

    Ok(Json(ApiResponse::message_only("Member deleted successfully")))
}
