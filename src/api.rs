//! HTTP surface: router, handlers and the failure-localization boundary.
//!
//! The router carries a single cross-cutting middleware,
//! [`localize_failures`], which resolves the request locale once and
//! rewrites any failure a handler produced into a localized envelope.
//! Routes that can leak unanticipated errors declare a fallback result
//! code at registration time via a route layer; routes without one are
//! covered by the process-wide default, so no request can ever fault on a
//! missing declaration.
//!
//! Success-wrapping policy: the `/test/*` handlers return envelopes
//! themselves, while `/api/users/...` returns the raw record array.

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::codes::ResultCode;
use crate::db::{Database, User};
use crate::error::{AppError, Failure};
use crate::i18n::{Locale, MessageCatalog};
use crate::response::ApiResponse;

/// Shared, immutable per-process state: the repository handle, the message
/// catalog and the default locale.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub catalog: Arc<MessageCatalog>,
    pub default_locale: Locale,
}

impl AppState {
    pub fn new(db: Database, catalog: MessageCatalog) -> Self {
        let default_locale = catalog.default_locale().clone();
        Self {
            db,
            catalog: Arc::new(catalog),
            default_locale,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/test/case1", get(test_case1))
        .route(
            "/test/case2",
            get(test_case2).route_layer(middleware::from_fn(|req: Request, next: Next| {
                apply_declared_fallback(ResultCode::Error, req, next)
            })),
        )
        .route(
            "/test/case3",
            post(login).route_layer(middleware::from_fn(|req: Request, next: Next| {
                apply_declared_fallback(ResultCode::Error, req, next)
            })),
        )
        .route("/api/users/name/:name", get(get_users_by_name))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            localize_failures,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ==================== Middleware ====================

/// Boundary middleware: resolve the locale from the request headers, run
/// the handler, and if it failed, replace the body with an envelope whose
/// message is localized for that locale.
async fn localize_failures(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let locale = Locale::resolve(req.headers(), &state.default_locale);
    let mut response = next.run(req).await;

    if let Some(failure) = response.extensions_mut().remove::<Failure>() {
        let (code, message) = failure.render(&state.catalog, &locale);
        return (StatusCode::OK, Json(ApiResponse::<()>::error(code, message))).into_response();
    }

    response
}

/// Route layer binding a fallback result code for unmapped errors, the
/// registration-time equivalent of a per-endpoint error annotation. Runs
/// inside `localize_failures`, so the code is set before rendering.
async fn apply_declared_fallback(code: ResultCode, req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    if let Some(Failure::Unmapped { fallback }) = response.extensions_mut().get_mut::<Failure>() {
        fallback.get_or_insert(code);
    }

    response
}

// ==================== Handlers ====================

/// Always fails with a business-rule violation.
async fn test_case1() -> Result<Json<ApiResponse<()>>, AppError> {
    Err(AppError::domain(ResultCode::BusinessException))
}

/// Fails with an error no handler anticipated; the route's declared
/// fallback code shapes the envelope.
async fn test_case2() -> Result<Json<ApiResponse<()>>, AppError> {
    Err(anyhow::anyhow!("simulated unhandled failure").into())
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    /// Field-level checks; returns message keys for every violated
    /// constraint so they localize like any other catalog entry.
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.username.trim().is_empty() {
            errors.push("username_not_empty".to_string());
        }
        if self.password.trim().is_empty() {
            errors.push("password_not_empty".to_string());
        }
        errors
    }
}

/// Body-validated login stub.
async fn login(Json(request): Json<LoginRequest>) -> Result<Json<ApiResponse<()>>, AppError> {
    let errors = request.validate();
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    info!("login accepted for '{}'", request.username);
    Ok(Json(ApiResponse::ok(())))
}

/// Name-based user lookup. No match is an empty array, not a 404.
async fn get_users_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = state.db.find_by_name(&name).await?;
    Ok(Json(users))
}
