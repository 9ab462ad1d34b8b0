//! Book catalog routes.
//!
//! Reads are public; writes require staff privileges.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use shelfmark_core::policy::can_manage_catalog;
use shelfmark_db::{
    BookRepository,
    entities::{books, sea_orm_active_enums::CoverType},
    repositories::{BookError, CreateBookInput, UpdateBookInput},
};

/// Request body for creating a book.
#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// Cover type; soft when omitted.
    pub cover: Option<CoverType>,
    /// Copies available to borrow.
    pub inventory: i32,
    /// Fee charged per day on loan.
    pub daily_fee: Decimal,
}

/// Request body for partially updating a book. Absent fields stay unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    /// New title.
    pub title: Option<String>,
    /// New author.
    pub author: Option<String>,
    /// New cover type.
    pub cover: Option<CoverType>,
    /// New inventory count.
    pub inventory: Option<i32>,
    /// New daily fee.
    pub daily_fee: Option<Decimal>,
}

/// Book record returned by the catalog routes.
#[derive(Debug, Serialize)]
pub struct BookResponse {
    /// Book ID.
    pub id: Uuid,
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// Cover type.
    pub cover: CoverType,
    /// Copies available to borrow.
    pub inventory: i32,
    /// Fee charged per day on loan.
    pub daily_fee: Decimal,
}

impl From<books::Model> for BookResponse {
    fn from(book: books::Model) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            cover: book.cover,
            inventory: book.inventory,
            daily_fee: book.daily_fee,
        }
    }
}

/// Creates the public catalog routes.
pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books))
        .route("/books/{id}", get(get_book))
}

/// Creates the staff-only catalog routes.
pub fn manage_routes() -> Router<AppState> {
    Router::new()
        .route("/books", post(create_book))
        .route("/books/{id}", patch(update_book).delete(delete_book))
}

/// Rejects callers without catalog-management rights.
fn check_staff(auth: &AuthUser) -> Result<(), Response> {
    if can_manage_catalog(auth.is_staff()) {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "forbidden",
                "message": "You do not have permission to perform this action."
            })),
        )
            .into_response())
    }
}

/// Maps a catalog error onto the wire shape.
fn book_error_response(e: &BookError) -> Response {
    match e {
        // Field-attributed; the first violation names the offending field
        BookError::Invalid(violations) => match violations.first() {
            Some(v) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "validation_error",
                    "message": v.to_string(),
                    "field": v.field()
                })),
            )
                .into_response(),
            None => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "validation_error",
                    "message": "Invalid book fields"
                })),
            )
                .into_response(),
        },
        BookError::DuplicateTitleAuthor { title, author } => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_book",
                "message": format!("Book '{title}' by {author} already exists")
            })),
        )
            .into_response(),
        BookError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Book not found"
            })),
        )
            .into_response(),
        BookError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response(),
    }
}

/// GET /books - List the catalog, ordered by title then author.
async fn list_books(State(state): State<AppState>) -> impl IntoResponse {
    let book_repo = BookRepository::new((*state.db).clone());

    match book_repo.list_books().await {
        Ok(books) => {
            let books: Vec<BookResponse> = books.into_iter().map(BookResponse::from).collect();
            (StatusCode::OK, Json(books)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list books");
            book_error_response(&e)
        }
    }
}

/// GET /books/{id} - Get a single book.
async fn get_book(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let book_repo = BookRepository::new((*state.db).clone());

    match book_repo.find_book_by_id(id).await {
        Ok(Some(book)) => (StatusCode::OK, Json(BookResponse::from(book))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Book not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, book_id = %id, "Failed to get book");
            book_error_response(&e)
        }
    }
}

/// POST /books - Add a book to the catalog.
async fn create_book(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateBookRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_staff(&auth) {
        return response;
    }

    let book_repo = BookRepository::new((*state.db).clone());

    let input = CreateBookInput {
        title: payload.title,
        author: payload.author,
        cover: payload.cover.unwrap_or(CoverType::Soft),
        inventory: payload.inventory,
        daily_fee: payload.daily_fee,
    };

    match book_repo.create_book(input).await {
        Ok(book) => {
            info!(book_id = %book.id, title = %book.title, "Book created");
            (StatusCode::CREATED, Json(BookResponse::from(book))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create book");
            book_error_response(&e)
        }
    }
}

/// PATCH /books/{id} - Update a book.
async fn update_book(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_staff(&auth) {
        return response;
    }

    let book_repo = BookRepository::new((*state.db).clone());

    let input = UpdateBookInput {
        title: payload.title,
        author: payload.author,
        cover: payload.cover,
        inventory: payload.inventory,
        daily_fee: payload.daily_fee,
    };

    match book_repo.update_book(id, input).await {
        Ok(book) => {
            info!(book_id = %book.id, "Book updated");
            (StatusCode::OK, Json(BookResponse::from(book))).into_response()
        }
        Err(e) => {
            error!(error = %e, book_id = %id, "Failed to update book");
            book_error_response(&e)
        }
    }
}

/// DELETE /books/{id} - Remove a book and its borrowing history.
async fn delete_book(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = check_staff(&auth) {
        return response;
    }

    let book_repo = BookRepository::new((*state.db).clone());

    match book_repo.delete_book(id).await {
        Ok(()) => {
            info!(book_id = %id, "Book deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, book_id = %id, "Failed to delete book");
            book_error_response(&e)
        }
    }
}
