mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use cinema_playback::RoomId;
use cinema_server::create_router;
use common::{HOLY_GRAIL, cinema, write_movie};
use serde_json::{Value, json};
use std::time::Duration;
use tower::ServiceExt;

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn hook(client_id: &str, message: &str) -> Request<Body> {
    post_json(
        "/hook",
        json!({
            "oauth_client_id": client_id,
            "item": { "message": { "message": message } },
        }),
    )
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

async fn install(app: &Router, client_id: &str, room_id: u64) -> StatusCode {
    let response = app
        .clone()
        .oneshot(post_json(
            "/installable",
            json!({"oauthId": client_id, "oauthSecret": "secret", "roomId": room_id}),
        ))
        .await
        .expect("response");
    response.status()
}

#[tokio::test]
async fn health_reports_ok() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (cinema, _messenger) = cinema(dir.path(), 0.0);
    let app = create_router(cinema);

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn descriptor_points_at_base_url() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (cinema, _messenger) = cinema(dir.path(), 0.0);
    let app = create_router(cinema);

    for uri in ["/", "/atlassian-connect.json"] {
        let response = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["name"], "Hipchat Cinema");
        assert_eq!(
            body["links"]["self"],
            "https://cinema.example.com/atlassian-connect.json"
        );
        assert_eq!(
            body["capabilities"]["installable"]["callbackUrl"],
            "https://cinema.example.com/installable"
        );
        assert_eq!(
            body["capabilities"]["webhook"][0]["url"],
            "https://cinema.example.com/hook"
        );
    }
}

#[tokio::test]
async fn install_then_play_through_webhook() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_movie(dir.path(), "the_holy_grail", HOLY_GRAIL);
    let (cinema, messenger) = cinema(dir.path(), 0.0);
    let app = create_router(cinema.clone());

    assert_eq!(install(&app, "client-1", 42).await, StatusCode::OK);
    assert_eq!(cinema.room_for("client-1"), Some(RoomId::from("42")));

    let response = app
        .clone()
        .oneshot(hook("client-1", "/play the_holy_grail"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for _ in 0..100 {
        if !cinema.theater().is_playing(&RoomId::from("42")) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(!cinema.theater().is_playing(&RoomId::from("42")));

    let messages = messenger.messages();
    assert_eq!(messages[0], "Got it, now playing \"The Holy Grail\"");
    assert_eq!(messages.len(), 6);
}

#[tokio::test]
async fn install_response_is_ok_list() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (cinema, _messenger) = cinema(dir.path(), 0.0);
    let app = create_router(cinema);

    let response = app
        .oneshot(post_json(
            "/installable",
            json!({"oauthId": "client-1", "oauthSecret": "secret", "roomId": 7}),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!(["OK"]));
}

#[tokio::test]
async fn refused_install_is_bad_gateway() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (cinema, _messenger) = cinema(dir.path(), 0.0);
    let app = create_router(cinema.clone());

    let response = app
        .oneshot(post_json(
            "/installable",
            json!({"oauthId": "client-1", "oauthSecret": "", "roomId": 7}),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(cinema.room_for("client-1"), None);
}

#[tokio::test]
async fn hook_from_unknown_client_is_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (cinema, messenger) = cinema(dir.path(), 0.0);
    let app = create_router(cinema);

    let response = app
        .oneshot(hook("stranger", "/play hackers"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(messenger.sent().is_empty());
}

#[tokio::test]
async fn uninstall_always_succeeds() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (cinema, _messenger) = cinema(dir.path(), 0.0);
    let app = create_router(cinema.clone());
    install(&app, "client-1", 42).await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::delete("/installable/client-1")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
    assert_eq!(cinema.room_for("client-1"), None);
    assert!(cinema.theater().rooms().is_empty());
}

#[tokio::test]
async fn malformed_hook_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (cinema, _messenger) = cinema(dir.path(), 0.0);
    let app = create_router(cinema);

    let response = app
        .oneshot(post_json("/hook", json!({"item": {}})))
        .await
        .expect("response");

    assert!(response.status().is_client_error());
}
