use bson::oid::ObjectId;
use serde_json::Value;

use crate::fixtures::test_app::TestApp;

fn summary_path(space_id: &ObjectId, meeting_id: &ObjectId) -> String {
    format!(
        "/api/space/{}/meeting/{}/summary",
        space_id.to_hex(),
        meeting_id.to_hex()
    )
}

#[tokio::test]
async fn summary_requires_authentication() {
    let app = TestApp::spawn().await;
    let space = app.seed_space("sum-auth").await;
    let meeting_id = app
        .seed_meeting(space.space_id, "Planning", Some("we discussed the roadmap"))
        .await;

    let resp = app
        .client
        .post(app.url(&summary_path(&space.space_id, &meeting_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 401);
}

#[tokio::test]
async fn summary_requires_space_membership() {
    let app = TestApp::spawn().await;
    let space = app.seed_space("sum-member").await;
    let meeting_id = app
        .seed_meeting(space.space_id, "Planning", Some("we discussed the roadmap"))
        .await;

    let resp = app
        .auth_post(
            &summary_path(&space.space_id, &meeting_id),
            &space.outsider.access_token,
        )
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 403);
}

#[tokio::test]
async fn summary_for_missing_meeting_is_404() {
    let app = TestApp::spawn().await;
    let space = app.seed_space("sum-404").await;

    let resp = app
        .auth_post(
            &summary_path(&space.space_id, &ObjectId::new()),
            &space.member.access_token,
        )
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn summary_without_transcript_is_rejected() {
    let app = TestApp::spawn().await;
    let space = app.seed_space("sum-notrans").await;
    let meeting_id = app.seed_meeting(space.space_id, "Planning", None).await;

    let resp = app
        .auth_post(
            &summary_path(&space.space_id, &meeting_id),
            &space.member.access_token,
        )
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 400);
    let json: Value = resp.json().await.unwrap();
    assert!(json["message"].as_str().unwrap().contains("transcript"));
}

#[tokio::test]
async fn summary_without_llm_credential_reports_failure() {
    // Without an LLM API key both generation calls fail and the request
    // surfaces a single error response.
    let app = TestApp::spawn_with_settings(|s| s.llm.api_key = None).await;
    let space = app.seed_space("sum-nokey").await;
    let meeting_id = app
        .seed_meeting(space.space_id, "Planning", Some("we discussed the roadmap"))
        .await;

    let resp = app
        .auth_post(
            &summary_path(&space.space_id, &meeting_id),
            &space.member.access_token,
        )
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 500);
    let json: Value = resp.json().await.unwrap();
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("summary"));
    assert!(message.contains("tasks"));
}
