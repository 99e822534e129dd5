use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::auth::repo_types::User;
use crate::auth::services::JwtKeys;
use crate::error::ApiError;
use crate::state::AppState;

/// The auth gate. Extracts the bearer token, verifies it, then re-resolves
/// the user from the store so `is_admin` is always the live value, never a
/// stale claim. Terminal on first failure; the token is only trusted to name
/// a user id.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthenticated("Access denied. No token provided."))?;

        // "Bearer " prefix is optional on this API.
        let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "token verification failed");
            ApiError::Unauthenticated("Authentication error")
        })?;

        let user = User::find_by_id(&state.db, claims.sub)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| {
                warn!(user_id = %claims.sub, "token references missing user");
                ApiError::Unauthenticated("User not found.")
            })?;

        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use uuid::Uuid;

    fn parts_with_auth(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/myprofile");
        if let Some(value) = header {
            builder = builder.header(axum::http::header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn missing_header_is_rejected_before_any_store_access() {
        // The fake state's pool cannot reach a database; an early return is
        // the only way this resolves to Unauthenticated.
        let state = AppState::fake();
        let mut parts = parts_with_auth(None);
        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .err()
            .expect("must reject");
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected_before_any_store_access() {
        let state = AppState::fake();
        let mut parts = parts_with_auth(Some("Bearer not-a-real-token"));
        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .err()
            .expect("must reject");
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let state = AppState::fake();
        let other = JwtKeys {
            encoding: jsonwebtoken::EncodingKey::from_secret(b"attacker"),
            decoding: jsonwebtoken::DecodingKey::from_secret(b"attacker"),
            ttl: std::time::Duration::from_secs(3600),
        };
        let token = other.sign(Uuid::new_v4()).expect("sign");
        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .err()
            .expect("must reject");
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }
}
