use bson::oid::ObjectId;
use serde_json::Value;

use crate::fixtures::test_app::TestApp;

fn webm_form(bytes: Vec<u8>) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name("standup.webm")
        .mime_str("video/webm")
        .unwrap();
    reqwest::multipart::Form::new().part("file", part)
}

fn recording_path(space_id: &ObjectId, meeting_id: &ObjectId) -> String {
    format!(
        "/api/space/{}/meeting/{}/recording",
        space_id.to_hex(),
        meeting_id.to_hex()
    )
}

#[tokio::test]
async fn health_check_reports_ok() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn upload_requires_authentication() {
    let app = TestApp::spawn().await;
    let space = app.seed_space("rec-auth").await;
    let meeting_id = app.seed_meeting(space.space_id, "Standup", None).await;

    let resp = app
        .client
        .post(app.url(&recording_path(&space.space_id, &meeting_id)))
        .multipart(webm_form(b"bytes".to_vec()))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 401);
}

#[tokio::test]
async fn upload_requires_space_membership() {
    let app = TestApp::spawn().await;
    let space = app.seed_space("rec-member").await;
    let meeting_id = app.seed_meeting(space.space_id, "Standup", None).await;

    let resp = app
        .auth_post(
            &recording_path(&space.space_id, &meeting_id),
            &space.outsider.access_token,
        )
        .multipart(webm_form(b"bytes".to_vec()))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 403);
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let app = TestApp::spawn().await;
    let space = app.seed_space("rec-nofile").await;
    let meeting_id = app.seed_meeting(space.space_id, "Standup", None).await;

    let form = reqwest::multipart::Form::new().text("note", "no file here");
    let resp = app
        .auth_post(
            &recording_path(&space.space_id, &meeting_id),
            &space.member.access_token,
        )
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 400);
    let json: Value = resp.json().await.unwrap();
    assert!(json["message"].as_str().unwrap().contains("file"));
}

#[tokio::test]
async fn upload_rejects_unsupported_content_type() {
    let app = TestApp::spawn().await;
    let space = app.seed_space("rec-mime").await;
    let meeting_id = app.seed_meeting(space.space_id, "Standup", None).await;

    let part = reqwest::multipart::Part::bytes(b"plain text".to_vec())
        .file_name("notes.txt")
        .mime_str("text/plain")
        .unwrap();
    let form = reqwest::multipart::Form::new().part("file", part);

    let resp = app
        .auth_post(
            &recording_path(&space.space_id, &meeting_id),
            &space.member.access_token,
        )
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 422);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "validation");
}

#[tokio::test]
async fn upload_rejects_empty_file() {
    let app = TestApp::spawn().await;
    let space = app.seed_space("rec-empty").await;
    let meeting_id = app.seed_meeting(space.space_id, "Standup", None).await;

    let resp = app
        .auth_post(
            &recording_path(&space.space_id, &meeting_id),
            &space.member.access_token,
        )
        .multipart(webm_form(Vec::new()))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 422);
}

#[tokio::test]
async fn upload_for_missing_meeting_is_404() {
    let app = TestApp::spawn().await;
    let space = app.seed_space("rec-404").await;
    // A real-looking id that was never inserted.
    let missing = ObjectId::new();

    let resp = app
        .auth_post(
            &recording_path(&space.space_id, &missing),
            &space.member.access_token,
        )
        .multipart(webm_form(b"bytes".to_vec()))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 404);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn upload_with_malformed_meeting_id_is_400() {
    let app = TestApp::spawn().await;
    let space = app.seed_space("rec-badid").await;

    let resp = app
        .auth_post(
            &format!(
                "/api/space/{}/meeting/not-an-id/recording",
                space.space_id.to_hex()
            ),
            &space.member.access_token,
        )
        .multipart(webm_form(b"bytes".to_vec()))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 400);
}
