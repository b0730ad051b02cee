mod common;

use common::{member_json, spawn_test_server};
use memberstream_server::{
    BackendInfo, ErrorBody, MutationResponse, MEMBER_ADDED, MEMBER_DELETED, MEMBER_UPDATED,
};
use memberstream_stream::BackendMode;
use memberstream_types::{EventEnvelope, EventType, MemberDetails, MemberId};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── POST /members/ ──────────────────────────────────────────────

#[tokio::test]
async fn add_member_emits_one_keyed_event() {
    let (base, sink) = spawn_test_server(BackendMode::Kinesis).await;

    let resp = reqwest::Client::new()
        .post(format!("{}/members/", base))
        .json(&member_json(1))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: MutationResponse = resp.json().await.unwrap();
    assert_eq!(body.message, MEMBER_ADDED);
    assert_eq!(body.message, "Member added successfully");

    let calls = sink.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].partition_key, "1");
    let envelope = EventEnvelope::decode(&calls[0].text()).unwrap();
    assert_eq!(envelope.event_type(), EventType::AddMember);
    assert_eq!(envelope.timestamp(), "2024-01-01T00:00:00");
    match envelope.details() {
        MemberDetails::Member(member) => {
            assert_eq!(member.id, MemberId::new(1));
            assert_eq!(member.email, "a@x.com");
        }
        other => panic!("expected full member, got {:?}", other),
    }
}

#[tokio::test]
async fn add_member_forwards_backend_ack() {
    let (base, _sink) = spawn_test_server(BackendMode::Kinesis).await;

    let body: serde_json::Value = reqwest::Client::new()
        .post(format!("{}/members/", base))
        .json(&member_json(1))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        body["response"],
        json!({ "ShardId": "shardId-000000000000", "SequenceNumber": "1" })
    );
}

#[tokio::test]
async fn add_member_missing_field_is_rejected_before_dispatch() {
    let (base, sink) = spawn_test_server(BackendMode::Kinesis).await;
    let mut member = member_json(1);
    member.as_object_mut().unwrap().remove("email");

    let resp = reqwest::Client::new()
        .post(format!("{}/members/", base))
        .json(&member)
        .send()
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
    assert_eq!(sink.call_count(), 0);
}

#[tokio::test]
async fn add_member_does_not_validate_values() {
    let (base, sink) = spawn_test_server(BackendMode::Kinesis).await;
    let mut member = member_json(3);
    member["email"] = json!("not-an-email");
    member["age"] = json!(-5);

    let resp = reqwest::Client::new()
        .post(format!("{}/members/", base))
        .json(&member)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(sink.call_count(), 1);
}

// ── PUT /members/{id} ───────────────────────────────────────────

#[tokio::test]
async fn update_member_emits_update_event() {
    let (base, sink) = spawn_test_server(BackendMode::Kinesis).await;

    let resp = reqwest::Client::new()
        .put(format!("{}/members/7", base))
        .json(&member_json(7))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: MutationResponse = resp.json().await.unwrap();
    assert_eq!(body.message, MEMBER_UPDATED);

    let call = &sink.calls()[0];
    assert_eq!(call.partition_key, "7");
    let envelope = EventEnvelope::decode(&call.text()).unwrap();
    assert_eq!(envelope.event_type(), EventType::UpdateMember);
}

#[tokio::test]
async fn update_member_body_id_wins_over_path() {
    let (base, sink) = spawn_test_server(BackendMode::Kinesis).await;

    let resp = reqwest::Client::new()
        .put(format!("{}/members/8", base))
        .json(&member_json(9))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let call = &sink.calls()[0];
    assert_eq!(call.partition_key, "9");
    let envelope = EventEnvelope::decode(&call.text()).unwrap();
    assert_eq!(envelope.member_id(), MemberId::new(9));
}

// ── DELETE /members/{id} ────────────────────────────────────────

#[tokio::test]
async fn delete_member_emits_id_only_event() {
    let (base, sink) = spawn_test_server(BackendMode::Kinesis).await;

    let resp = reqwest::Client::new()
        .delete(format!("{}/members/42", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: MutationResponse = resp.json().await.unwrap();
    assert_eq!(body.message, MEMBER_DELETED);
    assert_eq!(body.message, "Member deleted successfully");

    let calls = sink.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].partition_key, "42");
    let raw: serde_json::Value = serde_json::from_str(&calls[0].text()).unwrap();
    assert_eq!(raw["eventType"], "delete_member");
    assert_eq!(raw["details"], json!({ "id": 42 }));

    let nested: serde_json::Value =
        serde_json::from_str(raw["timestamp"].as_str().unwrap()).unwrap();
    assert!(!nested["timestamp"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn delete_member_non_numeric_id_is_rejected() {
    let (base, sink) = spawn_test_server(BackendMode::Kinesis).await;

    let resp = reqwest::Client::new()
        .delete(format!("{}/members/abc", base))
        .send()
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
    assert_eq!(sink.call_count(), 0);
}

// ── Failures ────────────────────────────────────────────────────

#[tokio::test]
async fn backend_failure_maps_to_500_with_message() {
    let (base, sink) = spawn_test_server(BackendMode::Kinesis).await;
    sink.fail_with("Stream members under account 123456789012 not found.");

    let resp = reqwest::Client::new()
        .post(format!("{}/members/", base))
        .json(&member_json(1))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    let body: ErrorBody = resp.json().await.unwrap();
    assert_eq!(
        body.detail,
        "Stream members under account 123456789012 not found."
    );
    assert_eq!(sink.call_count(), 1);
}

#[tokio::test]
async fn delete_failure_maps_to_500() {
    let (base, sink) = spawn_test_server(BackendMode::Firehose).await;
    sink.fail_with("AccessDeniedException");

    let resp = reqwest::Client::new()
        .delete(format!("{}/members/42", base))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    let body: ErrorBody = resp.json().await.unwrap();
    assert!(body.detail.contains("AccessDeniedException"));
}

// ── GET /config and routing ─────────────────────────────────────

#[tokio::test]
async fn config_endpoint_describes_backend() {
    let (base, _sink) = spawn_test_server(BackendMode::Firehose).await;

    let resp = reqwest::get(format!("{}/config", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.contains("application/json"));

    let body: BackendInfo = resp.json().await.unwrap();
    assert_eq!(
        body,
        BackendInfo {
            mode: BackendMode::Firehose,
            stream_name: "members".into(),
            region: Some("us-east-1".into()),
        }
    );
}

#[tokio::test]
async fn config_endpoint_uses_camel_case() {
    let (base, _sink) = spawn_test_server(BackendMode::Kinesis).await;
    let body: serde_json::Value = reqwest::get(format!("{}/config", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        body,
        json!({ "mode": "kinesis", "streamName": "members", "region": "us-east-1" })
    );
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let (base, _sink) = spawn_test_server(BackendMode::Kinesis).await;
    let resp = reqwest::get(format!("{}/api/v1/nonexistent", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let (base, _sink) = spawn_test_server(BackendMode::Kinesis).await;
    let resp = reqwest::Client::new()
        .get(format!("{}/config", base))
        .header("Origin", "http://example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .unwrap()
            .to_str()
            .unwrap(),
        "*"
    );
}
