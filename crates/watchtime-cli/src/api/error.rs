use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, warn};
use watchtime_core::TrackerError;

/// A tracker failure rendered as `{"error": {"kind", "message"}}`
#[derive(Debug)]
pub struct ApiError(pub TrackerError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TrackerError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TrackerError::NotFound(_) => StatusCode::NOT_FOUND,
            TrackerError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            TrackerError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            TrackerError::Duplicate(_) => StatusCode::CONFLICT,
            TrackerError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<TrackerError> for ApiError {
    fn from(e: TrackerError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.0.kind();
        let message = self.0.to_string();

        if status.is_server_error() {
            warn!(status = status.as_u16(), kind, error = %message, "Request failed");
        } else {
            debug!(status = status.as_u16(), kind, error = %message, "Request rejected");
        }

        let body = json!({
            "error": {
                "kind": kind,
                "message": message,
            }
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (TrackerError::Configuration("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (TrackerError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (TrackerError::UpstreamUnavailable("x".into()), StatusCode::BAD_GATEWAY),
            (TrackerError::RateLimited("x".into()), StatusCode::TOO_MANY_REQUESTS),
            (TrackerError::Duplicate("x".into()), StatusCode::CONFLICT),
            (TrackerError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
        ];
        for (error, expected) in cases {
            assert_eq!(ApiError(error).status(), expected);
        }
    }
}
