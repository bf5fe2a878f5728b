//! End-to-end notification tests: plugin input in, HTTP request out.

use mock_endpoint::{closed_port_url, MockEndpoint};
use drone_hipchat::{notify, PluginInput};
use hipchat_client::HipChatError;
use serde_json::{json, Value};

fn plugin_input(base_url: &str, vargs: Value) -> Value {
    let mut vargs = vargs;
    vargs["url"] = json!(base_url);
    vargs["room"] = json!(["1234"]);
    vargs["token"] = json!("secret");
    json!({
        "system": { "link_url": "https://drone.example.com" },
        "repo": { "owner": "octocat", "name": "hello-world", "full_name": "octocat/hello-world" },
        "build": {
            "number": 27,
            "event": "push",
            "status": "failure",
            "commit": "9f2c1a7e3b4d5c6f",
            "branch": "main",
            "author": "mona",
            "message": "Bump deps",
            "started_at": 1_700_000_000,
            "finished_at": 1_700_000_125,
            "link_url": "https://github.com/octocat/hello-world/commit/9f2c1a7e3b4d5c6f"
        },
        "vargs": vargs
    })
}

fn parse(value: &Value) -> PluginInput {
    PluginInput::from_json(&value.to_string()).unwrap()
}

#[tokio::test]
async fn card_notification_is_posted() {
    let mock = MockEndpoint::start(204, "No Content", "").await;
    let input = parse(&plugin_input(
        &mock.base_url,
        json!({ "from": "drone", "notify": true, "use_card": true }),
    ));
    let (payload, params) = input.into_parts();

    notify(&payload, &params).await.unwrap();
    let request = mock.request().await;

    assert_eq!(
        request.request_line,
        "POST /v2/room/1234/notification?auth_token=secret HTTP/1.1"
    );

    let body = request.json();
    assert_eq!(body["from"], "drone");
    assert_eq!(body["color"], "red");
    assert_eq!(body["notify"], true);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("<strong>Failure</strong>"));

    let card = &body["card"];
    assert_eq!(card["id"], "9f2c1a7e3b4d5c6f");
    assert_eq!(card["style"], "link");
    assert_eq!(card["title"], "failure");
    assert_eq!(card["url"], "https://drone.example.com/octocat/hello-world/27");
    assert_eq!(card["icon"], "http://readme.drone.io/logos/downstream.svg");
    assert_eq!(card["description"]["format"], "html");
    assert!(card["description"]["value"]
        .as_str()
        .unwrap()
        .contains("by mona in 2m5s"));
    assert_eq!(card["activity"]["html"], body["message"]);
    assert!(card.get("format").is_none());
}

#[tokio::test]
async fn broken_template_is_still_sent() {
    let mock = MockEndpoint::start(204, "No Content", "").await;
    let input = parse(&plugin_input(
        &mock.base_url,
        json!({ "template": "{{ build.missing_field }}" }),
    ));
    let (payload, params) = input.into_parts();

    let sent = notify(&payload, &params).await.unwrap();
    let body = mock.request().await.json();

    assert!(!sent.message.is_empty());
    assert_eq!(body["message"], sent.message);
    assert!(body.get("card").is_none());
}

#[tokio::test]
async fn delivery_error_is_returned() {
    let mock = MockEndpoint::start(500, "Internal Server Error", "rate limited").await;
    let input = parse(&plugin_input(&mock.base_url, json!({})));
    let (payload, params) = input.into_parts();

    let err = notify(&payload, &params).await.unwrap_err();
    assert!(matches!(
        err,
        HipChatError::Delivery { code: 500, ref body } if body == "rate limited"
    ));
}

#[tokio::test]
async fn binary_exits_zero_on_delivery() {
    let mock = MockEndpoint::start(204, "No Content", "").await;
    let input = plugin_input(&mock.base_url, json!({ "from": "drone" }));

    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_drone-hipchat"))
        .arg(input.to_string())
        .env_remove("HIPCHAT_URL")
        .env_remove("HIPCHAT_ROOM")
        .env_remove("HIPCHAT_TOKEN")
        .output()
        .await
        .unwrap();

    assert!(output.status.success());
    assert_eq!(mock.request().await.json()["color"], "red");
}

#[tokio::test]
async fn binary_exits_non_zero_on_delivery_error() {
    let mock = MockEndpoint::start(500, "Internal Server Error", "rate limited").await;
    let input = plugin_input(&mock.base_url, json!({}));

    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_drone-hipchat"))
        .arg(input.to_string())
        .env_remove("HIPCHAT_URL")
        .env_remove("HIPCHAT_ROOM")
        .env_remove("HIPCHAT_TOKEN")
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("HipChatError: 500 rate limited"), "{stderr}");
}

#[tokio::test]
async fn binary_rejects_invalid_input() {
    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_drone-hipchat"))
        .arg("{ not json")
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[tokio::test]
async fn binary_keeps_token_out_of_transport_errors() {
    let mut input = plugin_input(&closed_port_url(), json!({}));
    input["vargs"]["token"] = json!("SUPERSECRETTOKEN");

    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_drone-hipchat"))
        .arg(input.to_string())
        .env_remove("HIPCHAT_URL")
        .env_remove("HIPCHAT_ROOM")
        .env_remove("HIPCHAT_TOKEN")
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to deliver HipChat notification"), "{stderr}");
    assert!(!stderr.contains("SUPERSECRETTOKEN"), "{stderr}");
}
