mod common;

use common::TestServer;

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn landing_page_links_all_demos() {
    let server = TestServer::start().await;
    let driver = server.driver();

    let resp = driver.get("/").await;
    assert_eq!(resp.status(), 200);
    assert!(
        resp.headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );

    let body = resp.text().await.unwrap();
    for link in ["/interceptor.html", "/conditional.html", "/session.html"] {
        assert!(body.contains(link), "Landing page should link {link}");
    }
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn conditional_page_requires_exact_value() {
    let server = TestServer::start().await;
    let driver = server.driver();

    let resp = driver.get("/conditional.html?value=24").await;
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("hidden content is revealed"), "{body}");

    for path in [
        "/conditional.html",
        "/conditional.html?value=",
        "/conditional.html?value=24%20",
        "/conditional.html?value=024",
        "/conditional.html?value=24.0",
        "/conditional.html?value=25",
        "/conditional.html?Value=24",
    ] {
        let resp = driver.get(path).await;
        assert_eq!(resp.status(), 403, "{path}");

        let body = resp.text().await.unwrap();
        assert!(body.contains("Access denied."), "{path}: {body}");
    }
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn conditional_page_denies_repeated_value() {
    let server = TestServer::start().await;
    let driver = server.driver();

    for path in [
        "/conditional.html?value=24&value=1",
        "/conditional.html?value=1&value=24",
        "/conditional.html?value=24&value=24",
        "/conditional.html?value=24&value=",
    ] {
        let resp = driver.get(path).await;
        assert_eq!(resp.status(), 403, "{path}");
    }
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn conditional_page_ignores_session() {
    let server = TestServer::start().await;
    let driver = server.driver();

    driver.issue_session_key().await;

    let resp = driver.get("/conditional.html").await;
    assert_eq!(resp.status(), 403);
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn interceptor_page_wires_background_requests() {
    let server = TestServer::start().await;
    let driver = server.driver();

    let resp = driver.get("/interceptor.html").await;
    assert_eq!(resp.status(), 200);

    let body = resp.text().await.unwrap();
    assert!(body.contains("fetch('/track'"), "{body}");
    assert!(body.contains("X-Training-Demo"), "{body}");
    assert!(body.contains(r#"action="/submit""#), "{body}");
    assert!(body.contains("/pixel.gif?rand="), "{body}");
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn track_accepts_beacon() {
    let server = TestServer::start().await;
    let driver = server.driver();

    let resp = driver
        .post_form("/track", &[("event", "pageview"), ("path", "/interceptor.html")])
        .await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn submit_echoes_escaped_fields() {
    let server = TestServer::start().await;
    let driver = server.driver();

    let resp = driver
        .post_form(
            "/submit",
            &[("username", "student"), ("password", "<b>hunter2</b>")],
        )
        .await;
    assert_eq!(resp.status(), 200);

    let body = resp.text().await.unwrap();
    assert!(body.contains("Form POST received."), "{body}");
    assert!(body.contains("student"), "{body}");
    assert!(body.contains("&lt;b&gt;hunter2&lt;/b&gt;"), "{body}");
    assert!(!body.contains("<b>hunter2</b>"), "{body}");
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn pixel_is_served_as_gif() {
    let server = TestServer::start().await;
    let driver = server.driver();

    let resp = driver.get("/pixel.gif?rand=123").await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers().get("content-type").unwrap(), "image/gif");

    let bytes = resp.bytes().await.unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn unknown_path_is_json_404() {
    let server = TestServer::start().await;
    let driver = server.driver();

    let resp = driver.get("/does-not-exist").await;
    assert_eq!(resp.status(), 404);

    let body = resp.text().await.unwrap();
    assert_eq!(body, r#"{"message":"Not Found"}"#);

    server.shutdown().await;
}
