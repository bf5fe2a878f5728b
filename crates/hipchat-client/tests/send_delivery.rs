//! Delivery classification tests against an in-process endpoint.

use hipchat_client::{Color, HipChatClient, HipChatError, Message};
use mock_endpoint::{closed_port_url, MockEndpoint};

fn sample_message() -> Message {
    Message::new("drone", Color::Red, true, "<strong>Failure</strong>")
}

#[tokio::test]
async fn server_error_becomes_delivery_error() {
    let mock = MockEndpoint::start(500, "Internal Server Error", "rate limited").await;
    let client = HipChatClient::new(&mock.base_url, "123", "tok").unwrap();

    let err = client.send(&sample_message()).await.unwrap_err();
    match err {
        HipChatError::Delivery { code, body } => {
            assert_eq!(code, 500);
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected delivery error, got {other:?}"),
    }
}

#[tokio::test]
async fn client_error_becomes_delivery_error() {
    let mock = MockEndpoint::start(401, "Unauthorized", "Invalid OAuth session").await;
    let client = HipChatClient::new(&mock.base_url, "123", "bad").unwrap();

    let err = client.send(&sample_message()).await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    assert_eq!(err.to_string(), "HipChatError: 401 Invalid OAuth session");
}

#[tokio::test]
async fn no_content_is_success() {
    let mock = MockEndpoint::start(204, "No Content", "").await;
    let client = HipChatClient::new(&mock.base_url, "123", "tok").unwrap();

    client.send(&sample_message()).await.unwrap();
}

#[tokio::test]
async fn redirect_is_success_and_not_followed() {
    let mock = MockEndpoint::start(302, "Found", "").await;
    let client = HipChatClient::new(&mock.base_url, "123", "tok").unwrap();

    client.send(&sample_message()).await.unwrap();
    let request = mock.request().await;
    assert!(request.request_line.starts_with("POST "));
}

#[tokio::test]
async fn request_targets_room_endpoint_with_json_body() {
    let mock = MockEndpoint::start(204, "No Content", "").await;
    let client = HipChatClient::new(&mock.base_url, "42", "secret").unwrap();

    client.send(&sample_message()).await.unwrap();
    let request = mock.request().await;

    assert_eq!(
        request.request_line,
        "POST /v2/room/42/notification?auth_token=secret HTTP/1.1"
    );
    assert_eq!(request.header("content-type"), Some("application/json"));

    let body = request.json();
    assert_eq!(body["from"], "drone");
    assert_eq!(body["color"], "red");
    assert_eq!(body["notify"], true);
    assert_eq!(body["message"], "<strong>Failure</strong>");
    assert!(body.get("card").is_none());
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let client = HipChatClient::new(&closed_port_url(), "123", "tok").unwrap();
    let err = client.send(&sample_message()).await.unwrap_err();

    assert!(matches!(err, HipChatError::Transport(_)));
    assert!(err.status_code().is_none());
}

#[tokio::test]
async fn truncated_error_body_is_transport_error() {
    // Declares 100 bytes, sends 5, then closes
    let mock = MockEndpoint::start_raw(
        "HTTP/1.1 500 Internal Server Error\r\n\
         Content-Type: text/plain\r\n\
         Content-Length: 100\r\n\
         Connection: close\r\n\
         \r\n\
         short"
            .to_string(),
    )
    .await;
    let client = HipChatClient::new(&mock.base_url, "123", "tok").unwrap();

    let err = client.send(&sample_message()).await.unwrap_err();
    assert!(
        matches!(err, HipChatError::Transport(_)),
        "expected transport error, got {err:?}"
    );
    assert!(err.status_code().is_none());
}
