//! End-to-end tests for content-negotiated redirects.

use content_redirect::config::SelectionMode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, LOCATION};

mod common;

#[tokio::test]
async fn test_redirects_to_preferred_representation() {
    let server = common::start_server(common::sensor_config()).await;

    let res = common::client()
        .get(server.url("/sensor-1/data"))
        .header(ACCEPT, "text/html,text/turtle")
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 303);
    assert_eq!(
        res.headers().get(LOCATION).unwrap(),
        &server.url("/sensor-1/data.html")
    );
}

#[tokio::test]
async fn test_weights_select_json() {
    let server = common::start_server(common::sensor_config()).await;

    let res = common::client()
        .get(server.url("/sensor-1/data"))
        .header(ACCEPT, "text/html;q=0.8,application/json+ld")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 303);
    assert_eq!(
        res.headers().get(LOCATION).unwrap(),
        &server.url("/sensor-1/data.json")
    );
}

#[tokio::test]
async fn test_missing_accept_uses_wildcard_mapping() {
    let server = common::start_server(common::sensor_config()).await;

    let res = common::client()
        .get(server.url("/sensor-1/data?limit=10"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 303);
    assert_eq!(
        res.headers().get(LOCATION).unwrap(),
        &server.url("/sensor-1/data.ttl?limit=10")
    );
}

#[tokio::test]
async fn test_unmapped_type_is_not_acceptable() {
    let server = common::start_server(common::sensor_config()).await;

    let res = common::client()
        .get(server.url("/sensor-1/data"))
        .header(ACCEPT, "application/xml")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 406);
}

#[tokio::test]
async fn test_inactive_path_not_found() {
    let server = common::start_server(common::sensor_config()).await;

    let res = common::client()
        .get(server.url("/this/is/not/active/data"))
        .header(ACCEPT, "text/html")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_extension_path_served_by_fallback() {
    let server = common::start_server(common::sensor_config()).await;

    let res = common::client()
        .get(server.url("/sensor-1/data.html"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "<html>data</html>");
}

#[tokio::test]
async fn test_root_serves_index() {
    let server = common::start_server(common::sensor_config()).await;

    let res = common::client().get(server.url("/")).send().await.unwrap();

    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "<html>home</html>");
}

#[tokio::test]
async fn test_post_not_allowed() {
    let server = common::start_server(common::sensor_config()).await;

    let res = common::client()
        .post(server.url("/sensor-1/data"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 405);
}

#[tokio::test]
async fn test_serve_mode() {
    let mut config = common::sensor_config();
    config.content_selection.mode = SelectionMode::Serve;
    let server = common::start_server(config).await;
    let client = common::client();

    let res = client
        .get(server.url("/sensor-1/data"))
        .header(ACCEPT, "text/turtle")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers().get(LOCATION).unwrap(),
        &server.url("/sensor-1/data.ttl")
    );
    assert_eq!(res.headers().get(CONTENT_TYPE).unwrap(), "text/turtle");

    let res = client
        .get(server.url("/sensor-1/data"))
        .header(ACCEPT, "text/csv")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 406);
}
