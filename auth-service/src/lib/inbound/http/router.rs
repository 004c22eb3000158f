use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::HeaderValue;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::AllowHeaders;
use tower_http::cors::AllowMethods;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::health::health;
use super::handlers::health::root;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::register::register;
use super::handlers::update_profile::update_profile;
use super::middleware::require_bearer;
use crate::domain::user::ports::AccessGuardPort;
use crate::domain::user::ports::AuthenticatorPort;

#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<dyn AuthenticatorPort>,
    pub access_guard: Arc<dyn AccessGuardPort>,
}

pub fn create_router(
    authenticator: Arc<dyn AuthenticatorPort>,
    access_guard: Arc<dyn AccessGuardPort>,
    allowed_origins: &[String],
) -> Router {
    let state = AppState {
        authenticator,
        access_guard,
    };

    let public_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout));

    let protected_routes = Router::new()
        .route("/auth/me", get(me))
        .route("/auth/profile", put(update_profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
                user_id = tracing::field::Empty,
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// CORS restricted to the configured origins, with credentials allowed.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use auth::TokenIssuer;
    use axum::body::to_bytes;
    use http::header;
    use http::Method;
    use http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::user::authenticator::Authenticator;
    use crate::domain::user::guard::AccessGuard;
    use crate::outbound::repositories::InMemoryUserRepository;

    fn test_router() -> Router {
        let repository = Arc::new(InMemoryUserRepository::new());
        let issuer = Arc::new(TokenIssuer::new(
            b"router-test-secret-with-at-least-32-bytes",
        ));
        let authenticator = Arc::new(Authenticator::new(
            Arc::clone(&repository),
            Arc::clone(&issuer),
        ));
        let access_guard = Arc::new(AccessGuard::new(repository, issuer));

        create_router(
            authenticator,
            access_guard,
            &["http://localhost:3000".to_string()],
        )
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_protected_routes_reject_anonymous() {
        for (method, uri) in [(Method::GET, "/auth/me"), (Method::PUT, "/auth/profile")] {
            let response = test_router()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(uri)
                        .header(header::CONTENT_TYPE, "application/json")
                        .body(Body::from("{}"))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
            assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
        }
    }

    #[tokio::test]
    async fn test_login_requires_form_body() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/auth/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"username":"alice","password":"pw1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_cors_layer_skips_invalid_origins() {
        // Building must not panic on an origin that is not a valid header value
        let _layer = cors_layer(&[
            "http://localhost:3000".to_string(),
            "bad\norigin".to_string(),
        ]);
    }
}
