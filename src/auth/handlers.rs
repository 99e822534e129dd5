use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{
            AdminAuthResponse, AdminPublicUser, AuthResponse, LoginRequest, MakeAdminRequest,
            PublicUser, RegisterRequest,
        },
        extractors::CurrentUser,
        repo::is_unique_violation,
        repo_types::User,
        services::{hash_password, is_valid_email, normalize_email, verify_password, JwtKeys},
    },
    error::ApiError,
    mailer::send_best_effort,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/api/admin/login", post(admin_login))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/make-admin", post(make_admin))
        .route("/admin/users", get(admin_users))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<&'static str, ApiError> {
    payload.email = normalize_email(&payload.email);

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    if User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(ApiError::Internal)?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("User already registered".into()));
    }

    if payload.password != payload.confirmpassword {
        warn!(email = %payload.email, "password confirmation mismatch");
        return Err(ApiError::ValidationForbidden("Passwords do not match".into()));
    }

    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        ApiError::Internal(e)
    })?;

    let user = User::create(
        &state.db,
        &payload.fullname,
        &payload.email,
        &payload.mobile,
        &payload.skill,
        &hash,
    )
    .await
    .map_err(|e| {
        // The unique index is the authoritative duplicate check; the lookup
        // above only exists for the common case.
        if is_unique_violation(&e) {
            warn!(email = %payload.email, "duplicate email lost the race");
            ApiError::Conflict("User already registered".into())
        } else {
            error!(error = %e, "create user failed");
            ApiError::Internal(e.into())
        }
    })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    send_best_effort(
        state.mailer.as_ref(),
        &user.email,
        "Registration Successful",
        "Congratulations! Your registration was successful.",
    )
    .await;

    Ok("User registered")
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = normalize_email(&payload.email);

    let user = User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::NotFound("User does not exist".into())
        })?;

    let ok = verify_password(&payload.password, &user.password_hash).map_err(|e| {
        error!(error = %e, "verify_password failed");
        ApiError::Internal(e)
    })?;
    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Forbidden("Invalid password"));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        ApiError::Internal(e)
    })?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    send_best_effort(
        state.mailer.as_ref(),
        &user.email,
        "Login Successful",
        "You have successfully logged in.",
    )
    .await;

    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(user),
    }))
}

/// Parallel login path that only admits admins. The issued token is identical
/// in shape to a normal login token; the gate re-reads `is_admin` from the
/// store on every request anyway.
#[instrument(skip(state, payload))]
pub async fn admin_login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AdminAuthResponse>, ApiError> {
    payload.email = normalize_email(&payload.email);

    let user = User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            warn!(email = %payload.email, "admin login unknown email");
            ApiError::NotFound("User does not exist".into())
        })?;

    let ok = verify_password(&payload.password, &user.password_hash).map_err(|e| {
        error!(error = %e, "verify_password failed");
        ApiError::Internal(e)
    })?;
    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "admin login invalid password");
        return Err(ApiError::Forbidden("Invalid credentials"));
    }

    if !user.is_admin {
        warn!(user_id = %user.id, "admin login by non-admin");
        return Err(ApiError::Forbidden("Access denied. Not an admin."));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        ApiError::Internal(e)
    })?;

    info!(user_id = %user.id, email = %user.email, "admin logged in");
    Ok(Json(AdminAuthResponse {
        token,
        user: AdminPublicUser {
            fullname: user.fullname,
            email: user.email,
            is_admin: user.is_admin,
        },
    }))
}

#[instrument(skip(state, caller, payload))]
pub async fn make_admin(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(payload): Json<MakeAdminRequest>,
) -> Result<&'static str, ApiError> {
    if !caller.is_admin {
        warn!(user_id = %caller.id, "promotion attempt by non-admin");
        return Err(ApiError::Forbidden("Access denied. Not an admin."));
    }

    let email = normalize_email(&payload.email);
    let target = User::find_by_email(&state.db, &email)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    User::set_admin(&state.db, target.id)
        .await
        .map_err(ApiError::Internal)?;

    info!(admin = %caller.id, target = %target.id, "user promoted to admin");
    Ok("User is now an admin")
}

#[instrument(skip(state, caller))]
pub async fn admin_users(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<Vec<User>>, ApiError> {
    if !caller.is_admin {
        return Err(ApiError::Forbidden("Access denied. Not an admin."));
    }
    let users = User::list_all(&state.db).await.map_err(ApiError::Internal)?;
    Ok(Json(users))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn make_user(is_admin: bool) -> User {
        User {
            id: Uuid::new_v4(),
            fullname: "A".into(),
            email: "x@y.com".into(),
            mobile: "1".into(),
            skill: "s".into(),
            password_hash: "$argon2id$v=19$hash".into(),
            is_admin,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn non_admin_promotion_is_forbidden_before_any_store_access() {
        // The fake state's pool cannot reach a database; a Forbidden error
        // (rather than Internal) proves the handler bailed before touching
        // the store, so the target stays untouched.
        let state = AppState::fake();
        let err = make_admin(
            State(state),
            CurrentUser(make_user(false)),
            Json(MakeAdminRequest {
                email: "target@y.com".into(),
            }),
        )
        .await
        .err()
        .expect("must reject");
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[tokio::test]
    async fn non_admin_user_listing_is_forbidden() {
        let state = AppState::fake();
        let err = admin_users(State(state), CurrentUser(make_user(false)))
            .await
            .err()
            .expect("must reject");
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn auth_response_serializes_public_projection_only() {
        let user = make_user(false);
        let response = AuthResponse {
            token: "jwt".into(),
            user: PublicUser::from(user),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"token\""));
        assert!(json.contains("x@y.com"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn admin_response_carries_is_admin_flag() {
        let response = AdminAuthResponse {
            token: "jwt".into(),
            user: AdminPublicUser {
                fullname: "A".into(),
                email: "x@y.com".into(),
                is_admin: true,
            },
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"isAdmin\":true"));
    }
}
