//! User HTTP Routes
//!
//! Paths match the ones the existing browser client calls.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use crate::observability::Logger;
use crate::record::Record;
use crate::store::UserStore;
use crate::validation::{parse_age, sanitize_and_validate, sanitize_patch, ValidationError};

use super::errors::ApiResult;

// ==================
// Shared State
// ==================

/// User routes state shared across handlers
pub struct UsersState {
    pub store: Arc<UserStore>,
}

impl UsersState {
    pub fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub ok: bool,
    pub message: String,
    pub usuario: Record,
}

impl UserResponse {
    fn new(message: &str, usuario: Record) -> Self {
        Self {
            ok: true,
            message: message.to_string(),
            usuario,
        }
    }
}

// ==================
// User Routes
// ==================

/// Create user routes
pub fn user_routes(state: Arc<UsersState>) -> Router {
    Router::new()
        .route("/list-users", get(list_all_handler))
        .route("/list-users/:count", get(list_users_handler))
        .route("/usuarios", get(list_all_handler))
        .route("/cadastrar-usuario", post(create_user_handler))
        .route("/atualizar-usuario/:id", put(update_user_handler))
        .route("/remover-usuario/:id", delete(delete_user_handler))
        .with_state(state)
}

/// Leading integer of `count` (`"10abc"` is 10); none, or negative, means "all"
fn parse_count(count: &str) -> i64 {
    parse_age(&Value::from(count)).unwrap_or(0).max(0)
}

/// Unreadable bodies answer with the same envelope as invalid fields
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ValidationError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ValidationError::invalid(vec![rejection.body_text()]))
}

// ==================
// Handlers
// ==================

async fn list_all_handler(State(state): State<Arc<UsersState>>) -> ApiResult<Json<Vec<Record>>> {
    Ok(Json(state.store.list_all(0).await?))
}

async fn list_users_handler(
    State(state): State<Arc<UsersState>>,
    Path(count): Path<String>,
) -> ApiResult<Json<Vec<Record>>> {
    Ok(Json(state.store.list_all(parse_count(&count)).await?))
}

async fn create_user_handler(
    State(state): State<Arc<UsersState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let input = sanitize_and_validate(&json_body(body)?)?;
    let record = state.store.append(input).await?;

    Logger::info("USER_CREATED", &[("id", &record.id)]);
    Ok((
        StatusCode::CREATED,
        Json(UserResponse::new("User registered successfully", record)),
    ))
}

async fn update_user_handler(
    State(state): State<Arc<UsersState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<UserResponse>> {
    let patch = sanitize_patch(&json_body(body)?)?;
    let record = state.store.update_by_id(&id, patch).await?;

    Logger::info("USER_UPDATED", &[("id", &record.id)]);
    Ok(Json(UserResponse::new("User updated successfully", record)))
}

async fn delete_user_handler(
    State(state): State<Arc<UsersState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let record = state.store.delete_by_id(&id).await?;

    Logger::info("USER_REMOVED", &[("id", &record.id)]);
    Ok(Json(UserResponse::new("User removed successfully", record)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("10"), 10);
        assert_eq!(parse_count("10abc"), 10);
        assert_eq!(parse_count(" 3 "), 3);
        assert_eq!(parse_count("-4"), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count(""), 0);
    }
}
