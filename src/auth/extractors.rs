use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::jwt::JwtKeys;
use crate::error::ApiError;

/// Extracts and validates the bearer token, yielding the caller's user id.
#[derive(Debug)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".into()))?;

        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header".into()))?;

        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::Unauthorized("Invalid or expired token".into())
        })?;

        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use jsonwebtoken::{DecodingKey, EncodingKey};
    use std::time::Duration;

    fn keys() -> JwtKeys {
        JwtKeys {
            encoding: EncodingKey::from_secret(b"test-secret"),
            decoding: DecodingKey::from_secret(b"test-secret"),
            issuer: "test".into(),
            audience: "test".into(),
            ttl: Duration::from_secs(300),
        }
    }

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/palettes");
        if let Some(v) = value {
            builder = builder.header(axum::http::header::AUTHORIZATION, v);
        }
        let (parts, _) = builder.body(Body::empty()).expect("request").into_parts();
        parts
    }

    #[tokio::test]
    async fn accepts_valid_bearer_token() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id).expect("sign");

        let mut parts = parts_with_auth(Some(&format!("Bearer {token}")));
        let AuthUser(extracted) = AuthUser::from_request_parts(&mut parts, &keys)
            .await
            .expect("extract");
        assert_eq!(extracted, user_id);
    }

    #[tokio::test]
    async fn rejects_missing_header() {
        let mut parts = parts_with_auth(None);
        let err = AuthUser::from_request_parts(&mut parts, &keys())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn rejects_non_bearer_scheme() {
        let mut parts = parts_with_auth(Some("Basic dXNlcjpwYXNz"));
        let err = AuthUser::from_request_parts(&mut parts, &keys())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn rejects_garbage_token() {
        let mut parts = parts_with_auth(Some("Bearer definitely-not-a-jwt"));
        let err = AuthUser::from_request_parts(&mut parts, &keys())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
