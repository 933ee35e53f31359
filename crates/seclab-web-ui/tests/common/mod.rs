#![allow(dead_code)]

use seclab_web_ui::{Opts, UiServer};

/// A test web UI server running on a random port.
pub struct TestServer {
    server: UiServer,
    base_url: String,
}

impl TestServer {
    pub async fn start() -> Self {
        let opts = Opts::builder().listen("127.0.0.1:0").build();

        let server = seclab_web_ui::start_ui(opts)
            .await
            .expect("Failed to start test server");

        let base_url = format!("http://{}", server.local_addr());

        Self { server, base_url }
    }

    /// Create a new `UiDriver` with its own cookie jar (independent browser).
    pub fn driver(&self) -> UiDriver {
        UiDriver::new(self.base_url.clone(), true)
    }

    /// Create a `UiDriver` that never stores or sends cookies on its own.
    pub fn cookieless_driver(&self) -> UiDriver {
        UiDriver::new(self.base_url.clone(), false)
    }

    pub fn server(&self) -> &UiServer {
        &self.server
    }

    /// Shut down the server cleanly.
    pub async fn shutdown(self) {
        self.server
            .shutdown()
            .await
            .expect("Server shutdown failed");
    }
}

/// HTTP client driver for interacting with the web UI in tests.
pub struct UiDriver {
    client: reqwest::Client,
    base_url: String,
}

impl UiDriver {
    fn new(base_url: String, cookie_store: bool) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(cookie_store)
            // Don't auto-follow redirects, let tests assert on them.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a GET request to the given path.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// Send a GET request with an explicit `Cookie` header.
    pub async fn get_with_cookie(&self, path: &str, cookie: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .header("Cookie", cookie)
            .send()
            .await
            .expect("GET request failed")
    }

    /// Send a form POST to the given path.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    /// Request a new session key, returning it and the raw `Set-Cookie`
    /// header of the response.
    pub async fn issue_session_key(&self) -> (String, String) {
        let resp = self.get("/session.html").await;
        assert_eq!(resp.status(), 200);

        let set_cookie = resp
            .headers()
            .get("set-cookie")
            .expect("Missing Set-Cookie on issuance")
            .to_str()
            .expect("Invalid Set-Cookie header")
            .to_owned();

        let body = resp.text().await.expect("Failed to read body");
        (extract_session_key(&body), set_cookie)
    }
}

/// Pull the displayed session key out of the issuance page.
pub fn extract_session_key(body: &str) -> String {
    const MARKER: &str = r#"id="session-key">"#;
    let start = body.find(MARKER).expect("Session key not displayed") + MARKER.len();
    let end = start + body[start..].find('<').expect("Unterminated session key");
    body[start..end].to_owned()
}
