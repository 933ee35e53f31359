use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use seclab_core::{SESSION_CREDENTIAL_NAME, SessionToken};
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

/// Raw value of the first `session` cookie the browser sent.
///
/// Read from the request headers rather than the [`Cookies`] jar: the jar is
/// keyed by name and keeps the last duplicate, while the first one wins here.
pub(crate) fn session_key_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_CREDENTIAL_NAME)
        .map(|cookie| cookie.value().to_owned())
}

pub(crate) trait CookiesExt {
    /// Hand `token` to the browser as the `session` cookie.
    ///
    /// The cookie is readable from JS (not `HttpOnly`) so students can copy
    /// it from dev tools, and has no expiry: it lasts for the browser session.
    fn save_session_key(&self, token: SessionToken);
}

impl CookiesExt for Cookies {
    fn save_session_key(&self, token: SessionToken) {
        let mut cookie = Cookie::new(SESSION_CREDENTIAL_NAME, token.to_string());
        cookie.set_path("/");
        cookie.set_same_site(SameSite::Lax);
        cookie.set_http_only(false);
        self.add(cookie);
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(cookies: &[&'static str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(COOKIE, HeaderValue::from_static(*cookie));
        }
        headers
    }

    #[test]
    fn first_duplicate_session_cookie_wins() {
        let h = headers(&["theme=dark; session=aaa; session=bbb"]);
        assert_eq!(session_key_from_headers(&h).as_deref(), Some("aaa"));

        let h = headers(&["session=aaa", "session=bbb"]);
        assert_eq!(session_key_from_headers(&h).as_deref(), Some("aaa"));
    }

    #[test]
    fn missing_and_empty_session_cookie() {
        assert_eq!(session_key_from_headers(&headers(&[])), None);
        assert_eq!(session_key_from_headers(&headers(&["theme=dark"])), None);
        assert_eq!(
            session_key_from_headers(&headers(&["session="])).as_deref(),
            Some("")
        );
    }
}
