//! JSON error envelope shared by every API route.
//!
//! Errors implement [`IntoErrorResponse`] to pick a status and code; the
//! conversion logs them at a level matching their severity.
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::{Rejection, Reply};

/// Body of every non-2xx API response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine-readable code, e.g. `table_not_found`
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn into_response(self, status: StatusCode) -> Response {
        reply::with_status(reply::json(&self), status).into_response()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Bad input from the caller (4xx)
    Client,
    /// Unexpected failure on our side (5xx)
    Server,
    /// Shared state can no longer be trusted
    Critical,
}

pub trait IntoErrorResponse {
    fn status_code(&self) -> StatusCode;

    fn error_code(&self) -> &'static str;

    fn error_message(&self) -> String;

    fn error_details(&self) -> Option<serde_json::Value> {
        None
    }

    fn severity(&self) -> ErrorSeverity {
        if self.status_code().is_server_error() {
            ErrorSeverity::Server
        } else {
            ErrorSeverity::Client
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        match self.error_details() {
            Some(details) => {
                ErrorResponse::with_details(self.error_code(), self.error_message(), details)
            }
            None => ErrorResponse::new(self.error_code(), self.error_message()),
        }
    }

    fn into_http_response(self) -> Response
    where
        Self: Sized,
    {
        let status = self.status_code();
        let body = self.to_error_response();
        log_error(self.severity(), status, &body);
        body.into_response(status)
    }
}

fn log_error(severity: ErrorSeverity, status: StatusCode, body: &ErrorResponse) {
    match severity {
        ErrorSeverity::Client => tracing::info!(
            status = status.as_u16(),
            code = %body.error,
            "client error: {}",
            body.message
        ),
        ErrorSeverity::Server => tracing::error!(
            status = status.as_u16(),
            code = %body.error,
            "server error: {}",
            body.message
        ),
        ErrorSeverity::Critical => tracing::error!(
            status = status.as_u16(),
            code = %body.error,
            critical = true,
            "critical error: {}",
            body.message
        ),
    }
}

/// Turns warp rejections (unknown route, unreadable body, wrong method)
/// into the same JSON envelope the handlers use.
pub async fn handle_rejection(rejection: Rejection) -> Result<Response, Infallible> {
    let (status, body) = if rejection.is_not_found() {
        (
            StatusCode::NOT_FOUND,
            ErrorResponse::new("not_found", "No such route"),
        )
    } else if let Some(err) = rejection.find::<warp::filters::body::BodyDeserializeError>() {
        (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("invalid_body", err.to_string()),
        )
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorResponse::new("method_not_allowed", "Method not allowed for this route"),
        )
    } else if rejection
        .find::<warp::reject::UnsupportedMediaType>()
        .is_some()
    {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorResponse::new("unsupported_media_type", "Request body must be JSON"),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("internal_error", format!("{rejection:?}")),
        )
    };

    log_error(ErrorSeverity::Client, status, &body);
    Ok(body.into_response(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn details_are_omitted_when_absent() {
        let error = ErrorResponse::new("table_not_found", "Table not found: t1");
        let json = serde_json::to_value(&error).expect("serialize");

        assert_eq!(json["error"], "table_not_found");
        assert_eq!(json["message"], "Table not found: t1");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn details_are_carried_through() {
        let error = ErrorResponse::with_details(
            "validation_failed",
            "Exactly one dealer is required, found 2",
            json!({"kind": "validation"}),
        );
        let json = serde_json::to_value(&error).expect("serialize");
        assert_eq!(json["details"]["kind"], "validation");
    }

    #[test]
    fn display_joins_code_and_message() {
        let error = ErrorResponse::new("render_failed", "Cannot render scene: missing x");
        assert_eq!(error.to_string(), "render_failed: Cannot render scene: missing x");
    }

    #[tokio::test]
    async fn unknown_routes_get_the_json_envelope() {
        let response = handle_rejection(warp::reject::not_found())
            .await
            .expect("infallible");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
