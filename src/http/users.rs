use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::users::{NewUser, User, UserId, UserList};

pub async fn list_users(State(state): State<AppState>) -> Json<UserList> {
    Json(UserList::from(state.store.list()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&raw_id)?;
    state.store.get(id).map(Json).ok_or(ApiError::UserNotFound)
}

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(new_user) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected create payload");
        ApiError::from(rejection)
    })?;

    let user = state.store.create(new_user)?;
    tracing::info!(id = user.id, name = %user.name, role = %user.role, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Accept only plain decimal ids; "+5" or " 5" are rejected.
///
/// A well-formed number too large to have been issued is simply not found.
fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::InvalidUserId(raw.to_string()));
    }
    raw.parse().map_err(|_| ApiError::UserNotFound)
}
