use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use seclab_core::TokenGenerateError;
use seclab_util_error::FmtCompact as _;
use serde::Serialize;
use snafu::Snafu;
use tracing::{debug, warn};

use super::routes::AppJson;
use crate::LOG_TARGET;

/// Error by the user
#[derive(Debug, Snafu)]
pub enum UserRequestError {
    #[snafu(display("Not Found"))]
    SomethingNotFound,
}

impl IntoResponse for &UserRequestError {
    fn into_response(self) -> Response {
        let status_code = match self {
            UserRequestError::SomethingNotFound => StatusCode::NOT_FOUND,
        };
        (
            status_code,
            AppJson(UserErrorResponse {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

// How we want user errors responses to be serialized
#[derive(Serialize)]
pub struct UserErrorResponse {
    pub message: String,
}

/// Failure of a request handler.
///
/// Access denials are not errors: they are rendered from a
/// [`seclab_core::Decision`] by the handlers themselves.
#[derive(Debug, Snafu)]
pub enum RequestError {
    #[snafu(visibility(pub(crate)))]
    TokenGenerate { source: TokenGenerateError },
    #[snafu(transparent)]
    User { source: UserRequestError },
}
pub type RequestResult<T> = std::result::Result<T, RequestError>;

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        debug!(
            target: LOG_TARGET,
            err = %self.fmt_compact(),
            "Request Error"
        );

        let (status_code, message) = match self {
            RequestError::User { source } => return (&source).into_response(),
            err => {
                warn!(
                    target: LOG_TARGET,
                    err = %err.fmt_compact(),
                    "Unexpected Request Error"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Service Error".to_owned(),
                )
            }
        };

        (status_code, AppJson(UserErrorResponse { message })).into_response()
    }
}
