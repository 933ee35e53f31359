use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use maud::html;
use tracing::debug;

use super::Maud;
use crate::util::extractors::QueryParams;
use crate::{LOG_TARGET, SharedState};

pub async fn get_page(state: State<SharedState>, params: QueryParams) -> impl IntoResponse {
    let gate = state.gate();
    let value = params.get(gate.param);
    let decision = gate.check(value.as_deref());

    debug!(target: LOG_TARGET, ?value, granted = decision.is_granted(), "Conditional page");

    if !decision.is_granted() {
        let content = html! {
            p { strong { "Access denied." } " Provide the correct query parameter." }
            p { "Try: " code { "/conditional.html?" (gate.param) "=" (gate.expected) } }
        };
        return (
            StatusCode::FORBIDDEN,
            Maud(state.render_html_page("Page 2 - Access Denied", content)),
        );
    }

    let content = html! {
        div ."card" {
            h2 { "Welcome!" }
            p {
                "You provided "
                code { (gate.param) "=" (gate.expected) }
                ", so the hidden content is revealed."
            }
        }
    };
    (
        StatusCode::OK,
        Maud(state.render_html_page("Page 2 - Conditional Content", content)),
    )
}
