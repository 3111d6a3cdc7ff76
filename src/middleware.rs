use crate::{auth::jwt::verify_jwt, error::AppError, state::AppState};
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

/// Authenticated caller identity, inserted into request extensions by
/// [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub email: String,
}

/// Guard for task routes.
///
/// A bearer token is accepted only when the signature and expiry verify AND
/// the token registry still holds its live marker. The registry check is what
/// makes logout and refresh take effect immediately.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Authentication("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Authentication("Invalid Authorization header".to_string()))?;

    let claims = verify_jwt(token, &state.config.jwt_secret)?;

    if !state.token_store.is_live(token).await? {
        return Err(AppError::Authentication(
            "Token is invalid or expired".to_string(),
        ));
    }

    req.extensions_mut().insert(CurrentUser {
        email: claims.email,
    });

    Ok(next.run(req).await)
}

/// Pull the raw bearer token out of an Authorization header value.
///
/// Used by logout and refresh, which operate on the literal token string
/// without requiring the signature to verify first.
pub fn bearer_token(auth_header: Option<&str>) -> Result<&str, AppError> {
    auth_header
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::BadRequest("Missing or invalid Authorization header".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extracts_value() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_token_rejects_missing_header() {
        assert!(bearer_token(None).is_err());
    }

    #[test]
    fn test_bearer_token_rejects_wrong_scheme() {
        assert!(bearer_token(Some("Basic dXNlcjpwdw==")).is_err());
    }
}
