//! Bearer-token resolution middleware
//!
//! Validates the `Authorization: Bearer` header and resolves the
//! subject to a fresh user row. Role and membership status come from
//! the database on every request, never from claims: an upgrade
//! decision must observe committed state, not what was true at token
//! issue time.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;

use orchard_shared::{MembershipStatus, User, UserId, UserRole};

use crate::auth::jwt::JwtManager;
use crate::error::ApiError;

/// State needed by the auth middleware
#[derive(Clone)]
pub struct AuthState {
    pub jwt: JwtManager,
    pub pool: PgPool,
}

/// The resolved caller, inserted as a request extension
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
    pub role: UserRole,
    pub membership_status: MembershipStatus,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            membership_status: user.membership_status,
        }
    }
}

/// Middleware that requires a valid bearer token resolving to a user
pub async fn require_auth(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request).ok_or(ApiError::Unauthorized)?;

    let claims = state
        .jwt
        .validate_token(token)
        .map_err(|_| ApiError::InvalidToken)?;

    let user: Option<User> = sqlx::query_as(
        "SELECT id, email, role, membership_status FROM users WHERE id = $1",
    )
    .bind(UserId(claims.sub))
    .fetch_optional(&state.pool)
    .await?;

    // A token whose subject no longer exists is just an invalid token
    let user = user.ok_or(ApiError::InvalidToken)?;

    request.extensions_mut().insert(AuthUser::from(user));
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn request_with_auth(value: &str) -> Request<Body> {
        Request::builder()
            .header("Authorization", value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_bearer_token_extraction() {
        let req = request_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_scheme_is_rejected() {
        let req = request_with_auth("abc.def.ghi");
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn test_empty_bearer_is_rejected() {
        let req = request_with_auth("Bearer ");
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn test_no_header_is_rejected() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(bearer_token(&req), None);
    }
}
