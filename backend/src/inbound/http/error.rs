//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into the `{success: false, ...}` envelope
//! and a matching status code. Extractor failures (bad JSON, bad path or
//! query) are routed through the same envelope.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::schemas::ErrorCodeSchema;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Failure body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Always `false`.
    pub success: bool,
    /// Stable machine-readable error code.
    #[schema(value_type = ErrorCodeSchema)]
    pub code: ErrorCode,
    /// Human-readable message.
    #[schema(example = "Post not found")]
    pub error: String,
    /// Correlation identifier matching the `trace-id` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Field-level validation messages and other structured context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

impl From<&Error> for ErrorEnvelope {
    fn from(value: &Error) -> Self {
        let redacted = matches!(value.code(), ErrorCode::InternalError);
        Self {
            success: false,
            code: value.code(),
            error: if redacted {
                INTERNAL_MESSAGE.to_owned()
            } else {
                value.message().to_owned()
            },
            trace_id: value.trace_id().map(str::to_owned),
            details: if redacted {
                None
            } else {
                value.details().cloned()
            },
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        match self.code() {
            ErrorCode::InternalError | ErrorCode::ServiceUnavailable => error!(
                code = ?self.code(),
                trace_id = self.trace_id().unwrap_or_default(),
                detail = %self.message(),
                "request failed"
            ),
            code => debug!(?code, message = %self.message(), "request rejected"),
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(ErrorEnvelope::from(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_MESSAGE)
    }
}

fn extractor_error(message: &str, reason: String) -> actix_web::Error {
    Error::invalid_request(message)
        .with_details(json!({ "reason": reason }))
        .into()
}

/// JSON body configuration reporting parse failures as `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        extractor_error("Invalid JSON body", err.to_string())
    })
}

/// Path configuration reporting undecodable segments as `invalid_request`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| {
        extractor_error("Invalid path parameter", err.to_string())
    })
}

/// Query-string configuration reporting undecodable queries as
/// `invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        extractor_error("Invalid query string", err.to_string())
    })
}

/// Fallback handler for unknown routes.
pub async fn route_not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(format!("Route {} not found", req.uri())))
}

#[cfg(test)]
mod tests;
