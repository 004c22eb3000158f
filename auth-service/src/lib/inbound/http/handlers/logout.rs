use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: &'static str,
}

/// Tokens are stateless, so there is nothing to revoke server-side; the
/// client drops its token.
pub async fn logout() -> ApiSuccess<MessageData> {
    ApiSuccess::new(
        StatusCode::OK,
        MessageData {
            message: "Successfully logged out",
        },
    )
}
