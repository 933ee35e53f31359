use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use seclab_core::{CredentialPresentation, SESSION_CREDENTIAL_NAME};

use super::QueryParams;
use crate::cookies::session_key_from_headers;

/// Session credentials presented on the request: the `session` query
/// parameter and the first `session` cookie, both verbatim.
///
/// A repeated `session` query key is kept as its comma-joined form, which
/// never names a valid token.
pub struct PresentedCredentials(pub CredentialPresentation);

impl<S> FromRequestParts<S> for PresentedCredentials
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = QueryParams::from_uri(&parts.uri)
            .get(SESSION_CREDENTIAL_NAME)
            .map(|v| v.into_owned());

        Ok(Self(CredentialPresentation::new(
            query,
            session_key_from_headers(&parts.headers),
        )))
    }
}
