//! Borrowing lifecycle routes.
//!
//! Every route requires authentication. Non-staff callers only ever see
//! and act on their own borrowings; staff see everything and may narrow
//! the list to one user.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::routes::books::BookResponse;
use crate::{AppState, middleware::AuthUser};
use shelfmark_core::{circulation::parse_is_active, policy::BorrowingScope};
use shelfmark_db::{
    BorrowingRepository,
    entities::borrowings,
    repositories::{BorrowingError, BorrowingFilter, CreateBorrowingInput},
};

/// Query parameters for listing borrowings.
#[derive(Debug, Deserialize)]
pub struct ListBorrowingsQuery {
    /// Activity filter: `true`/`t`/`1` keeps active borrowings, any other
    /// value keeps returned ones, absent keeps both.
    pub is_active: Option<String>,
    /// Narrow the list to one user's records. Staff only; ignored for
    /// everyone else.
    pub user_id: Option<Uuid>,
}

/// Request body for borrowing a book.
///
/// The owner is always the caller and the borrow date is stamped
/// server-side, so neither is accepted here.
#[derive(Debug, Deserialize)]
pub struct CreateBorrowingRequest {
    /// Book to borrow.
    pub book_id: Uuid,
    /// Date the caller promises to return the book.
    pub expected_return_date: NaiveDate,
}

/// Borrowing list item with display keys for the book and user.
#[derive(Debug, Serialize)]
pub struct BorrowingListItem {
    /// Borrowing ID.
    pub id: Uuid,
    /// Date the book was borrowed.
    pub borrow_date: NaiveDate,
    /// Date the book is due back.
    pub expected_return_date: NaiveDate,
    /// Date the book came back, if it has.
    pub actual_return_date: Option<NaiveDate>,
    /// Title of the borrowed book.
    pub book: String,
    /// Email of the borrowing user.
    pub user: String,
}

/// Borrowing detail with the full book record.
#[derive(Debug, Serialize)]
pub struct BorrowingDetailResponse {
    /// Borrowing ID.
    pub id: Uuid,
    /// Date the book was borrowed.
    pub borrow_date: NaiveDate,
    /// Date the book is due back.
    pub expected_return_date: NaiveDate,
    /// Date the book came back, if it has.
    pub actual_return_date: Option<NaiveDate>,
    /// The borrowed book.
    pub book: BookResponse,
    /// Email of the borrowing user.
    pub user: String,
}

/// Flat borrowing record, returned by create and return.
#[derive(Debug, Serialize)]
pub struct BorrowingRecord {
    /// Borrowing ID.
    pub id: Uuid,
    /// Borrowing user.
    pub user_id: Uuid,
    /// Borrowed book.
    pub book_id: Uuid,
    /// Date the book was borrowed.
    pub borrow_date: NaiveDate,
    /// Date the book is due back.
    pub expected_return_date: NaiveDate,
    /// Date the book came back, if it has.
    pub actual_return_date: Option<NaiveDate>,
}

impl From<borrowings::Model> for BorrowingRecord {
    fn from(borrowing: borrowings::Model) -> Self {
        Self {
            id: borrowing.id,
            user_id: borrowing.user_id,
            book_id: borrowing.book_id,
            borrow_date: borrowing.borrow_date,
            expected_return_date: borrowing.expected_return_date,
            actual_return_date: borrowing.actual_return_date,
        }
    }
}

/// Creates the borrowings router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/borrowings", get(list_borrowings).post(create_borrowing))
        .route("/borrowings/{id}", get(get_borrowing))
        .route("/borrowings/{id}/return", post(return_borrowing))
}

/// Maps a borrowing error onto the wire shape.
fn borrowing_error_response(e: &BorrowingError) -> Response {
    match e {
        BorrowingError::BookNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Book not found: {id}")
            })),
        )
            .into_response(),
        BorrowingError::BookNotAvailable { .. } => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "book_not_available",
                "message": e.to_string(),
                "field": "book_id"
            })),
        )
            .into_response(),
        // Field-attributed; the first violation names the offending field
        BorrowingError::InvalidDates(violations) => match violations.first() {
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
                    "message": "Invalid borrowing dates"
                })),
            )
                .into_response(),
        },
        BorrowingError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Borrowing not found"
            })),
        )
            .into_response(),
        BorrowingError::AlreadyReturned { .. } => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "already_returned",
                "message": e.to_string()
            })),
        )
            .into_response(),
        BorrowingError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response(),
    }
}

/// GET /borrowings - List borrowings visible to the caller, newest first.
async fn list_borrowings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListBorrowingsQuery>,
) -> impl IntoResponse {
    let scope = BorrowingScope::for_caller(auth.user_id(), auth.is_staff(), query.user_id);
    let filter = BorrowingFilter {
        is_active: parse_is_active(query.is_active.as_deref()),
    };

    let borrowing_repo = BorrowingRepository::new((*state.db).clone(), state.clock.clone());

    match borrowing_repo.list_borrowings(&scope, filter).await {
        Ok(items) => {
            let items: Vec<BorrowingListItem> = items
                .into_iter()
                .map(|s| BorrowingListItem {
                    id: s.borrowing.id,
                    borrow_date: s.borrowing.borrow_date,
                    expected_return_date: s.borrowing.expected_return_date,
                    actual_return_date: s.borrowing.actual_return_date,
                    book: s.book_title,
                    user: s.user_email,
                })
                .collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list borrowings");
            borrowing_error_response(&e)
        }
    }
}

/// GET /borrowings/{id} - Get one borrowing with its full book record.
async fn get_borrowing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let scope = BorrowingScope::for_caller(auth.user_id(), auth.is_staff(), None);
    let borrowing_repo = BorrowingRepository::new((*state.db).clone(), state.clock.clone());

    match borrowing_repo.find_borrowing(id, &scope).await {
        Ok(Some(detail)) => (
            StatusCode::OK,
            Json(BorrowingDetailResponse {
                id: detail.borrowing.id,
                borrow_date: detail.borrowing.borrow_date,
                expected_return_date: detail.borrowing.expected_return_date,
                actual_return_date: detail.borrowing.actual_return_date,
                book: BookResponse::from(detail.book),
                user: detail.user_email,
            }),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Borrowing not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, borrowing_id = %id, "Failed to get borrowing");
            borrowing_error_response(&e)
        }
    }
}

/// POST /borrowings - Borrow a book.
///
/// The borrow date is today per the server clock; the book's inventory
/// drops by one in the same transaction that records the borrowing.
async fn create_borrowing(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateBorrowingRequest>,
) -> impl IntoResponse {
    let borrowing_repo = BorrowingRepository::new((*state.db).clone(), state.clock.clone());

    let input = CreateBorrowingInput {
        user_id: auth.user_id(),
        book_id: payload.book_id,
        expected_return_date: payload.expected_return_date,
    };

    match borrowing_repo.create_borrowing(input).await {
        Ok(borrowing) => {
            info!(
                borrowing_id = %borrowing.id,
                user_id = %borrowing.user_id,
                book_id = %borrowing.book_id,
                "Book borrowed"
            );
            (StatusCode::CREATED, Json(BorrowingRecord::from(borrowing))).into_response()
        }
        Err(e) => {
            error!(error = %e, user_id = %auth.user_id(), "Failed to create borrowing");
            borrowing_error_response(&e)
        }
    }
}

/// POST /borrowings/{id}/return - Return a borrowed book.
///
/// The return date is today per the server clock; the book's inventory
/// rises by one in the same transaction. Returning twice fails.
async fn return_borrowing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let scope = BorrowingScope::for_caller(auth.user_id(), auth.is_staff(), None);
    let borrowing_repo = BorrowingRepository::new((*state.db).clone(), state.clock.clone());

    match borrowing_repo.return_borrowing(id, &scope).await {
        Ok(borrowing) => {
            info!(
                borrowing_id = %borrowing.id,
                book_id = %borrowing.book_id,
                "Book returned"
            );
            (StatusCode::OK, Json(BorrowingRecord::from(borrowing))).into_response()
        }
        Err(e) => {
            error!(error = %e, borrowing_id = %id, "Failed to return borrowing");
            borrowing_error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfmark_core::circulation::DateRuleViolation;

    #[test]
    fn test_unavailable_book_maps_to_bad_request() {
        let response = borrowing_error_response(&BorrowingError::BookNotAvailable {
            title: "Dune".to_string(),
        });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_book_maps_to_404() {
        let response = borrowing_error_response(&BorrowingError::BookNotFound(Uuid::new_v4()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_dates_map_to_bad_request() {
        let response = borrowing_error_response(&BorrowingError::InvalidDates(vec![
            DateRuleViolation::ExpectedBeforeBorrow,
        ]));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_already_returned_maps_to_bad_request() {
        let returned_on = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let response = borrowing_error_response(&BorrowingError::AlreadyReturned {
            title: "Dune".to_string(),
            returned_on,
        });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_borrowing_maps_to_404() {
        let response = borrowing_error_response(&BorrowingError::NotFound(Uuid::new_v4()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

/// Integration tests driven through the router. The database stays
/// disconnected: every path exercised here rejects before a query runs.
#[cfg(test)]
mod integration_tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, header::AUTHORIZATION},
        middleware::from_fn_with_state,
    };
    use http_body_util::BodyExt;
    use sea_orm::DatabaseConnection;
    use shelfmark_core::clock::SystemClock;
    use shelfmark_shared::{JwtConfig, JwtService};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::middleware::auth::auth_middleware;

    fn test_app() -> Router {
        let state = AppState {
            db: Arc::new(DatabaseConnection::Disconnected),
            jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
            clock: Arc::new(SystemClock),
        };
        Router::new()
            .merge(routes())
            .layer(from_fn_with_state(state.clone(), auth_middleware))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_list_borrowings_without_token_is_unauthorized() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/borrowings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "missing_token");
    }

    #[tokio::test]
    async fn test_return_with_garbage_token_is_unauthorized() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/borrowings/{}/return", Uuid::new_v4()))
                    .header(AUTHORIZATION, "Bearer not-a-real-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "invalid_token");
    }
}
