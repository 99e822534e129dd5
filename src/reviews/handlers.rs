use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::extractors::CurrentUser,
    error::ApiError,
    reviews::{dto::AddReviewRequest, repo_types::Review},
    state::AppState,
};

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/addreview", post(add_review))
        .route("/myreview", get(my_reviews))
}

#[instrument(skip(state, caller, payload))]
pub async fn add_review(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(payload): Json<AddReviewRequest>,
) -> Result<(StatusCode, &'static str), ApiError> {
    payload.validate()?;

    // Rater display name is denormalized into the row at write time.
    let review = Review::create(&state.db, &caller.fullname, &payload.taskworker, payload.rating)
        .await
        .map_err(ApiError::Internal)?;

    info!(review_id = %review.id, rater = %caller.id, ratee = %review.task_worker, "review added");
    Ok((StatusCode::CREATED, "Review added successfully"))
}

#[instrument(skip(state, caller))]
pub async fn my_reviews(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = Review::list_for_worker(&state.db, &caller.id.to_string())
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(reviews))
}
