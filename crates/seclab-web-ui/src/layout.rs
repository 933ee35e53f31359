use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::UiState;

const STYLE: &str = r#"
body{font-family:system-ui,-apple-system,Segoe UI,Roboto,Ubuntu,Helvetica,Arial,sans-serif;margin:2rem;line-height:1.45}
header{margin-bottom:1.5rem}
.card{border:1px solid #ddd;border-radius:12px;padding:1rem;margin:1rem 0;box-shadow:0 1px 3px rgba(0,0,0,.05)}
code,kbd,pre{background:#f7f7f7;border-radius:8px;padding:.15rem .4rem}
a{color:#0a60ff;text-decoration:none}
a:hover{text-decoration:underline}
.muted{opacity:.7}
.ok{color:#0a7a2f}
.bad{color:#b3261e}
"#;

impl UiState {
    /// Html page header
    pub(crate) fn render_html_head(&self, page_title: &str) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en";
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (page_title) }
                style { (PreEscaped(STYLE)) }
            }
        }
    }

    pub(crate) fn render_html_page(&self, title: &str, content: Markup) -> Markup {
        html! {
            (self.render_html_head(title))
            body {
                header {
                    h1 { (title) }
                    (render_top_nav())
                }
                (content)
            }
        }
    }
}

/// Links to every demo page, shown on top of each page.
fn render_top_nav() -> Markup {
    html! {
        nav ."muted" {
            "[ "
            a href="/" { "home" }
            " | "
            a href="/interceptor.html" { "interceptor" }
            " | "
            a href="/conditional.html" { "conditional" }
            " | "
            a href="/session.html" { "session" }
            " ]"
        }
    }
}
