//! Session key issuance and the page it unlocks.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use maud::{Markup, html};
use seclab_core::{
    CredentialPresentation, Decision, DenyReason, Grant, SESSION_CREDENTIAL_NAME,
};
use snafu::ResultExt as _;
use tower_cookies::Cookies;
use tracing::info;

use super::Maud;
use crate::cookies::CookiesExt as _;
use crate::error::{RequestResult, TokenGenerateSnafu};
use crate::util::extractors::PresentedCredentials;
use crate::{LOG_TARGET, SharedState, UiState};

/// Issue a new session key, set it as a cookie and show it.
pub async fn get_issue(state: State<SharedState>, cookies: Cookies) -> RequestResult<Maud> {
    let token = state.sessions().issue().context(TokenGenerateSnafu)?;

    info!(
        target: LOG_TARGET,
        issued = state.sessions().len(),
        "Issued session key"
    );

    cookies.save_session_key(token);

    let key = token.to_string();
    let protected_url = format!("/protected.html?{SESSION_CREDENTIAL_NAME}={key}");
    let content = html! {
        div ."card" {
            p {
                "Here is your session key (also set as a cookie named "
                code { (SESSION_CREDENTIAL_NAME) }
                "):"
            }
            pre { code id="session-key" { (key) } }
            p { "Use it to access the protected page:" }
            ul {
                li { a href=(protected_url) { (protected_url) } }
                li {
                    "or visit "
                    code { "/protected.html" }
                    " and rely on the "
                    code { (SESSION_CREDENTIAL_NAME) }
                    " cookie"
                }
            }
        }
    };

    Ok(Maud(state.render_html_page("Page 3 - Get Session Key", content)))
}

pub async fn get_protected(
    state: State<SharedState>,
    PresentedCredentials(presentation): PresentedCredentials,
) -> impl IntoResponse {
    match state.sessions().authorize(&presentation) {
        Decision::Granted(grant) => (
            StatusCode::OK,
            Maud(state.render_granted(&grant, &presentation)),
        ),
        Decision::Denied(reason) => (StatusCode::UNAUTHORIZED, Maud(state.render_denied(reason))),
    }
}

impl UiState {
    fn render_granted(&self, grant: &Grant, presentation: &CredentialPresentation) -> Markup {
        let content = html! {
            div ."card" {
                h2 { "Access Granted ✅" }
                p { "Your key " code { (grant.token) } " is valid." }
                p { "Accepted from the " (grant.source) "." }
                (render_channel_report(grant, presentation))
                p ."muted" {
                    "(In real apps, keys would be stored server-side with expiry, user binding, and HttpOnly cookies.)"
                }
            }
        };
        self.render_html_page("Protected - Success", content)
    }

    fn render_denied(&self, reason: DenyReason) -> Markup {
        let content = html! {
            p { strong { "Unauthorized." } " You need a valid session key." }
            p ."bad" { "Reason: " (reason) "." }
            p {
                "Get one from "
                a href="/session.html" { "/session.html" }
                ", then retry."
            }
        };
        self.render_html_page("Protected - Unauthorized", content)
    }
}

/// Per-channel status: `valid` when it carried the granted key, `not matching`
/// when it carried something else, `absent` when empty or missing.
fn render_channel_report(grant: &Grant, presentation: &CredentialPresentation) -> Markup {
    let row = |name: &str, valid: bool, present: bool| {
        html! {
            li {
                code { (name) } ": "
                @if valid {
                    span ."ok" { "valid" }
                } @else if present {
                    span ."bad" { "not matching" }
                } @else {
                    span ."muted" { "absent" }
                }
            }
        }
    };

    html! {
        ul {
            (row("?session=", grant.channels.query_valid, presentation.query().is_some()))
            (row("session cookie", grant.channels.cookie_valid, presentation.cookie().is_some()))
        }
    }
}
