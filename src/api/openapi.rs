//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, borrowings, health, members};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libraria API",
        version = "0.1.0",
        description = "Library lending management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::add_book,
        books::list_books,
        books::get_book,
        books::update_book,
        books::delete_book,
        // Members
        members::add_member,
        members::list_members,
        members::get_member,
        members::update_member,
        members::delete_member,
        // Borrowings
        borrowings::borrow_book,
        borrowings::return_book,
        borrowings::list_borrowings,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::member::Member,
            crate::models::member::CreateMember,
            crate::models::member::UpdateMember,
            crate::models::borrowing::Borrowing,
            crate::models::borrowing::BorrowRequest,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "members", description = "Member management"),
        (name = "borrowings", description = "Borrow and return workflow")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
