//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod auth;
pub mod books;
pub mod borrowings;
pub mod health;
pub mod users;

/// Creates the API router with all routes.
///
/// Catalog reads are public; catalog writes, borrowings, and profile
/// routes sit behind the authentication middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(books::manage_routes())
        .merge(borrowings::routes())
        .merge(users::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(books::read_routes())
        .merge(protected_routes)
}
