use axum::extract::State;
use maud::html;

use super::Maud;
use crate::SharedState;

pub async fn get_index(state: State<SharedState>) -> Maud {
    let content = html! {
        div ."card" {
            h2 { "Pages" }
            ul {
                li {
                    a href="/interceptor.html" { "/interceptor.html" }
                    " - background requests appear in your proxy (Burp/ZAP)."
                }
                li {
                    a href="/conditional.html" { "/conditional.html" }
                    " - only shows real content when "
                    code { "?value=24" }
                    " is present."
                }
                li {
                    a href="/session.html" { "/session.html" }
                    " - get a session key that unlocks "
                    code { "/protected.html" }
                    "."
                }
            }
        }
        div ."card" {
            h3 { "Tip" }
            p {
                "Run your browser through Burp and visit "
                code { "/interceptor.html" }
                "; you should see a POST to "
                code { "/track" }
                ", an auto-submitted form to "
                code { "/submit" }
                ", and a beacon to "
                code { "/pixel.gif" }
                "."
            }
        }
        p ."muted" {
            "Session keys issued since start: " (state.sessions().len())
        }
    };

    Maud(state.render_html_page("Web Exploitation Demo", content))
}
