use std::borrow::Cow;
use std::io;

use log::{debug, error};
use rocket::http::Status;
use rocket::serde::json::{self, Json};
use rocket::{response, Request};
use serde::Serialize;

use expression::EvalError;
use telemetry::IsErr;

#[derive(Debug)]
pub enum ApiError {
    InternalError(String),
    InvalidExpression(EvalError),
    PayloadTooLarge,
    UnsupportedMediaType,
}

impl From<EvalError> for ApiError {
    fn from(e: EvalError) -> Self {
        ApiError::InvalidExpression(e)
    }
}

impl<'a> From<json::Error<'a>> for ApiError {
    fn from(e: json::Error<'a>) -> Self {
        match e {
            json::Error::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                ApiError::PayloadTooLarge
            }
            json::Error::Io(e) => ApiError::InternalError(format!("IO Error: {}", e)),
            json::Error::Parse(_, e) => {
                ApiError::InvalidExpression(EvalError::MalformedNode(e.to_string()))
            }
        }
    }
}

impl IsErr for ApiError {
    fn is_err(&self) -> bool {
        matches!(self, ApiError::InternalError(_))
    }

    fn class(&self) -> &'static str {
        match self {
            ApiError::InternalError(_) => "internal",
            ApiError::InvalidExpression(e) => e.kind(),
            ApiError::PayloadTooLarge => "payload_too_large",
            ApiError::UnsupportedMediaType => "unsupported_media_type",
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: Cow<'a, str>,
}

impl<'r> response::Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let (error, status) = match self {
            ApiError::InternalError(e) => {
                error!("Internal Error: {}", e);
                (
                    Cow::Borrowed("Internal Server Error"),
                    Status::InternalServerError,
                )
            }
            ApiError::InvalidExpression(e) => {
                debug!("Invalid Expression ({}): {}", e.kind(), e);
                (Cow::Owned(e.to_string()), Status::BadRequest)
            }
            ApiError::PayloadTooLarge => {
                (Cow::Borrowed("Payload Too Large"), Status::PayloadTooLarge)
            }
            ApiError::UnsupportedMediaType => (
                Cow::Borrowed("Content-Type must be application/json"),
                Status::UnsupportedMediaType,
            ),
        };
        response::status::Custom(status, Json(ErrorResponse { error })).respond_to(req)
    }
}
