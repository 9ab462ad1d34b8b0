//! Own-profile routes.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser};
use shelfmark_core::auth::{hash_password, validate_password};
use shelfmark_db::{UserRepository, repositories::UpdateUserInput};
use shelfmark_shared::auth::{UpdateProfileRequest, UserInfo};

/// Creates the profile router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users/me", get(get_profile).patch(update_profile))
}

/// GET /users/me - Return the caller's profile.
async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.find_by_id(auth.user_id()).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(UserInfo {
                id: user.id,
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
                is_staff: user.is_staff,
            }),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "User not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to load profile");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}

/// PATCH /users/me - Partially update the caller's profile.
///
/// A supplied password is re-validated against the password policy and
/// re-hashed. The staff flag is not writable here.
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    // The current record anchors the email-uniqueness check
    let current = match user_repo.find_by_id(auth.user_id()).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "not_found",
                    "message": "User not found"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Failed to load profile");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response();
        }
    };

    // Changing email must not collide with another account
    if let Some(email) = &payload.email
        && *email != current.email
    {
        match user_repo.email_exists(email).await {
            Ok(true) => {
                return (
                    StatusCode::CONFLICT,
                    Json(json!({
                        "error": "email_exists",
                        "message": "An account with this email already exists"
                    })),
                )
                    .into_response();
            }
            Ok(false) => {}
            Err(e) => {
                error!(error = %e, "Database error checking email");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "An error occurred"
                    })),
                )
                    .into_response();
            }
        }
    }

    // A new password passes the policy, then gets re-hashed
    let password_hash = match payload.password {
        Some(password) => {
            if let Err(e) = validate_password(&password) {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "validation_error",
                        "message": e.to_string(),
                        "field": "password"
                    })),
                )
                    .into_response();
            }
            match hash_password(&password) {
                Ok(h) => Some(h),
                Err(e) => {
                    error!(error = %e, "Failed to hash password");
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "error": "internal_error",
                            "message": "An error occurred"
                        })),
                    )
                        .into_response();
                }
            }
        }
        None => None,
    };

    let input = UpdateUserInput {
        email: payload.email,
        first_name: payload.first_name,
        last_name: payload.last_name,
        password_hash,
    };

    match user_repo.update_profile(auth.user_id(), input).await {
        Ok(Some(user)) => {
            info!(user_id = %user.id, "Profile updated");
            (
                StatusCode::OK,
                Json(UserInfo {
                    id: user.id,
                    email: user.email,
                    first_name: user.first_name,
                    last_name: user.last_name,
                    is_staff: user.is_staff,
                }),
            )
                .into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "User not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update profile");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}
