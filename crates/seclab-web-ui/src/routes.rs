mod conditional;
mod index;
pub(crate) mod interceptor;
mod session;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::http::header::{self, CONTENT_TYPE};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use maud::Markup;

use super::SharedState;
use super::error::{RequestError, UserRequestError};

#[derive(Clone, Debug)]
#[must_use]
pub struct Maud(pub Markup);

impl IntoResponse for Maud {
    fn into_response(self) -> Response {
        (
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            )],
            self.0.0,
        )
            .into_response()
    }
}

pub struct AppJson<T>(pub T);

impl<T> IntoResponse for AppJson<T>
where
    Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}

/// Pages echo session keys back, so nothing textual may be cached.
pub async fn cache_control(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    if let Some(content_type) = response.headers().get(CONTENT_TYPE) {
        const NON_CACHEABLE_CONTENT_TYPES: &[&str] =
            &["text/html", "text/plain", "application/json"];

        let value = if NON_CACHEABLE_CONTENT_TYPES
            .iter()
            .any(|&ct| content_type.as_bytes().starts_with(ct.as_bytes()))
        {
            HeaderValue::from_static("no-store")
        } else {
            HeaderValue::from_static("public, max-age=3600")
        };

        response.headers_mut().insert(header::CACHE_CONTROL, value);
    }

    response
}

pub async fn not_found() -> RequestError {
    UserRequestError::SomethingNotFound.into()
}

pub fn route_handler(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index::get_index))
        .route("/interceptor.html", get(interceptor::get_page))
        .route("/track", post(interceptor::post_track))
        .route("/submit", post(interceptor::post_submit))
        .route("/pixel.gif", get(interceptor::get_pixel))
        .route("/conditional.html", get(conditional::get_page))
        .route("/session.html", get(session::get_issue))
        .route("/protected.html", get(session::get_protected))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(cache_control))
}
