use serde_json::json;

use crate::fixtures::test_app::TestApp;

#[tokio::test]
async fn health_check_reports_ok() {
    let app = TestApp::spawn().await;
    let resp = app.get("/health").await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn missing_fields_are_defaulted_in_the_broadcast() {
    let app = TestApp::spawn().await;
    let mut viewer = app.subscribe().await;

    let resp = app.post_transcript(&json!({})).await;
    assert_eq!(resp.status().as_u16(), 200);

    let event = viewer.expect_event().await;
    assert_eq!(
        event,
        json!({
            "type": "transcript",
            "data": { "speaker": "Unknown", "text": "No text" }
        })
    );
}

#[tokio::test]
async fn transcript_field_is_preferred_over_text() {
    let app = TestApp::spawn().await;
    let mut viewer = app.subscribe().await;

    app.post_transcript(&json!({
        "speaker": "Alice",
        "transcript": "the provider's final text",
        "text": "an earlier draft"
    }))
    .await;

    let event = viewer.expect_event().await;
    assert_eq!(event["data"]["text"], "the provider's final text");
}

#[tokio::test]
async fn unparseable_body_is_still_acknowledged() {
    let app = TestApp::spawn().await;
    let mut viewer = app.subscribe().await;

    let resp = app
        .client
        .post(format!("http://{}/webhook/transcript", app.addr))
        .header("content-type", "application/json")
        .body("this is not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let ack: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(ack["status"], "received");

    // The fragment is defaulted, not dropped.
    let event = viewer.expect_event().await;
    assert_eq!(event["data"]["speaker"], "Unknown");
    assert_eq!(event["data"]["text"], "No text");
}
