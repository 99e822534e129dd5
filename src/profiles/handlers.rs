use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::{extractors::CurrentUser, repo_types::User},
    error::ApiError,
    profiles::dto::MyProfileResponse,
    reviews::repo_types::Review,
    state::AppState,
};

pub fn gated_routes() -> Router<AppState> {
    Router::new()
        .route("/allprofiles", get(all_profiles))
        .route("/myprofile", get(my_profile))
}

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/profiles", get(public_profiles))
        .route("/profile/:id", get(profile_by_id))
}

#[instrument(skip(state, caller))]
pub async fn all_profiles(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<Vec<User>>, ApiError> {
    tracing::debug!(user_id = %caller.id, "profile listing requested");
    let users = User::list_all(&state.db).await.map_err(ApiError::Internal)?;
    Ok(Json(users))
}

#[instrument(skip(state, caller))]
pub async fn my_profile(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<MyProfileResponse>, ApiError> {
    let reviews = Review::list_for_worker(&state.db, &caller.id.to_string())
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(MyProfileResponse {
        user: caller,
        reviews,
    }))
}

#[instrument(skip(state))]
pub async fn public_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = User::list_all(&state.db).await.map_err(ApiError::Internal)?;
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn profile_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let user = User::find_by_id(&state.db, id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Profile not found".into()))?;
    Ok(Json(user))
}
