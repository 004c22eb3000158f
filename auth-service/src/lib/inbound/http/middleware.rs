use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the caller resolved from the bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware that resolves the bearer token to a user and stores it in
/// the request extensions
pub async fn require_bearer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req)?.to_string();

    let user = state.access_guard.resolve(&token).await.map_err(|e| {
        tracing::debug!(error = %e, "Bearer authentication failed");
        ApiError::from(e)
    })?;

    tracing::Span::current().record("user_id", tracing::field::display(&user.id));
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    match auth_str.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() =>
        {
            Ok(token.trim())
        }
        _ => Err(ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request_with(value: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/auth/me");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = request_with(Some("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&req), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_extract_bearer_scheme_is_case_insensitive() {
        let req = request_with(Some("bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&req), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_extract_missing_header() {
        let req = request_with(None);
        assert!(matches!(
            extract_bearer_token(&req),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_extract_wrong_scheme() {
        let req = request_with(Some("Basic YWxpY2U6cHcx"));
        assert!(matches!(
            extract_bearer_token(&req),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_extract_empty_token() {
        let req = request_with(Some("Bearer   "));
        assert!(extract_bearer_token(&req).is_err());
    }
}
