//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    body::Bytes,
    extract::Query,
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::trace::TraceLayer;

use crate::error::{AppError, AppResult};
use crate::users::{self, CreatedView, UserCreate, UserView};

use super::middleware::{auth_middleware, AuthGate};

// =========================================================================
// API Router
// =========================================================================

/// Create the `/user` router (no auth applied)
///
/// `get` would also answer HEAD, so HEAD is routed to the 405 handler.
pub fn create_router() -> Router {
    Router::new().route(
        "/user",
        get(get_user)
            .post(create_user)
            .head(method_not_allowed)
            .fallback(method_not_allowed),
    )
}

/// Build the application router: `/user` behind the auth gate, `/health` open
pub fn build_router(gate: AuthGate) -> Router {
    // The gate wraps the method fallback too, so a bad key wins over 405.
    let protected_routes =
        create_router().layer(middleware::from_fn_with_state(gate, auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
}

// =========================================================================
// GET /user?id=
// =========================================================================

/// Look a user up by id. The first `id` parameter wins.
async fn get_user(Query(params): Query<Vec<(String, String)>>) -> AppResult<Json<UserView>> {
    let raw_id = params
        .iter()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.as_str());

    let view = users::lookup_raw(raw_id)?;

    Ok(Json(view))
}

// =========================================================================
// POST /user
// =========================================================================

/// Create a user from `{"name": ...}`
async fn create_user(body: Bytes) -> AppResult<(StatusCode, Json<CreatedView>)> {
    let input = UserCreate::from_json(&body)?;
    let view = users::create(input)?;

    tracing::info!(name = %view.created, "User created");

    Ok((StatusCode::CREATED, Json(view)))
}

/// Any other method on `/user`
async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
