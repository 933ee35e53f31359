use std::borrow::Cow;

use axum::extract::FromRequestParts;
use axum::http::Uri;
use axum::http::request::Parts;

/// Query string parameters, in the order they appeared.
///
/// Unlike `axum::extract::Query` this never rejects a request: a repeated key
/// or broken percent-encoding must not turn into a 400. Access checks see
/// such input as a value that matches nothing.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn from_uri(uri: &Uri) -> Self {
        Self(
            uri.query()
                .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
                .unwrap_or_default(),
        )
    }

    /// Value of `name`.
    ///
    /// A key given more than once yields all its values joined with `,`
    /// (`?value=24&value=1` is `"24,1"`), so a repeated parameter can never
    /// pass an exact match against a single expected value.
    pub fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        let mut values = self.0.iter().filter(|(k, _)| k == name).map(|(_, v)| v);
        let first = values.next()?;

        match values.next() {
            None => Some(Cow::Borrowed(first.as_str())),
            Some(second) => {
                let mut joined = format!("{first},{second}");
                for v in values {
                    joined.push(',');
                    joined.push_str(v);
                }
                Some(Cow::Owned(joined))
            }
        }
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_uri(&parts.uri))
    }
}
