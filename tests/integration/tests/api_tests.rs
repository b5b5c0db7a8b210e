//! API integration tests
//!
//! The full router and middleware stack runs over in-memory ports, so these
//! need no database or chat platform.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_error, assert_json, assert_status, fixtures::*, TestServer};
use reqwest::StatusCode;
use roster_core::{ChannelId, MemberId, Message};

async fn create_roster(server: &TestServer, name: &str) -> AttendanceBody {
    let response = server
        .post("/api/v1/attendance", &CreateAttendance::new(name, "u1"))
        .await
        .unwrap();
    let body: Envelope<AttendanceBody> = assert_json(response, StatusCode::CREATED).await.unwrap();
    body.data
}

async fn add(server: &TestServer, roster: &str, member: &str) -> AttendanceBody {
    let response = server
        .put(&format!("/api/v1/attendance/{roster}/members/{member}"))
        .await
        .unwrap();
    let body: Envelope<AttendanceBody> = assert_json(response, StatusCode::OK).await.unwrap();
    body.data
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_readiness_follows_store() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    server.attendance.set_failing(true);
    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::SERVICE_UNAVAILABLE).await.unwrap();
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .client
        .get(format!("{}/health", server.base_url()))
        .header("x-request-id", "req-42")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

// ============================================================================
// Rosters
// ============================================================================

#[tokio::test]
async fn test_roster_lifecycle() {
    let server = TestServer::start().await.unwrap();
    server.eligible("m1", "One");
    server.with_issues("m2", "Two", &["not an org member"]);

    let roster = create_roster(&server, "Mining Op").await;
    assert_eq!(roster.name, "Mining Op");
    assert_eq!(roster.submitted_by, "u1");
    assert!(!roster.recorded);

    add(&server, &roster.id, "m1").await;
    let updated = add(&server, &roster.id, "m2").await;
    assert_eq!(updated.member_ids(), vec!["m1"]);
    assert_eq!(updated.issue_ids(), vec!["m2"]);
    assert_eq!(updated.issues[0].reason, "not an org member");

    let response = server
        .post_empty(&format!("/api/v1/attendance/{}/record", roster.id))
        .await
        .unwrap();
    let recorded: Envelope<AttendanceBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(recorded.data.recorded);

    let response = server.get("/api/v1/members/m1/attendance").await.unwrap();
    let count: Envelope<CountBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.data.member_id, "m1");
    assert_eq!(count.data.count, 1);

    // Issues do not count as attendance
    let response = server.get("/api/v1/members/m2/attendance").await.unwrap();
    let count: Envelope<CountBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.data.count, 0);
}

#[tokio::test]
async fn test_create_rejects_empty_name() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post("/api/v1/attendance", &CreateAttendance::new("", "u1"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .client
        .post(format!("{}/api/v1/attendance", server.base_url()))
        .header("content-type", "application/json")
        .body("{\"name\":")
        .send()
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_BODY");
}

#[tokio::test]
async fn test_unknown_roster_is_not_found() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/attendance/missing").await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_ATTENDANCE");
}

#[tokio::test]
async fn test_unknown_member_is_not_found() {
    let server = TestServer::start().await.unwrap();
    let roster = create_roster(&server, "Patrol").await;

    let response = server
        .put(&format!("/api/v1/attendance/{}/members/ghost", roster.id))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_MEMBER");
}

#[tokio::test]
async fn test_recorded_roster_rejects_edits() {
    let server = TestServer::start().await.unwrap();
    server.eligible("m1", "One");
    let roster = create_roster(&server, "Patrol").await;

    server
        .post_empty(&format!("/api/v1/attendance/{}/record", roster.id))
        .await
        .unwrap();

    let response = server
        .put(&format!("/api/v1/attendance/{}/members/m1", roster.id))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_RECORDED");
}

#[tokio::test]
async fn test_remove_member_and_recheck() {
    let server = TestServer::start().await.unwrap();
    server.eligible("m1", "One");
    server.with_issues("m2", "Two", &["guest"]);
    let roster = create_roster(&server, "Salvage").await;
    add(&server, &roster.id, "m1").await;
    add(&server, &roster.id, "m2").await;

    let response = server
        .delete(&format!("/api/v1/attendance/{}/members/m1", roster.id))
        .await
        .unwrap();
    let body: Envelope<AttendanceBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.data.member_ids().is_empty());
    assert_eq!(body.data.issue_ids(), vec!["m2"]);

    // Issue cleared in the directory; recheck drops it without promotion
    server.members.set_issues("m2", &[]);
    let response = server
        .post_empty(&format!("/api/v1/attendance/{}/recheck", roster.id))
        .await
        .unwrap();
    let body: Envelope<AttendanceBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.data.issue_ids().is_empty());
    assert!(body.data.member_ids().is_empty());
}

#[tokio::test]
async fn test_list_returns_open_rosters() {
    let server = TestServer::start().await.unwrap();
    let open = create_roster(&server, "Open").await;
    let closed = create_roster(&server, "Closed").await;
    server
        .post_empty(&format!("/api/v1/attendance/{}/record", closed.id))
        .await
        .unwrap();

    let response = server.get("/api/v1/attendance").await.unwrap();
    let body: Envelope<Vec<AttendanceBody>> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<&str> = body.data.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec![open.id.as_str()]);

    let response = server.get("/api/v1/attendance?limit=5000").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_delete_roster() {
    let server = TestServer::start().await.unwrap();
    let roster = create_roster(&server, "Patrol").await;

    let response = server
        .delete(&format!("/api/v1/attendance/{}", roster.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get(&format!("/api/v1/attendance/{}", roster.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Publishing and buttons
// ============================================================================

#[tokio::test]
async fn test_publish_to_default_channel_then_edit() {
    let server = TestServer::start_with_default_channel(Some("rosters"))
        .await
        .unwrap();
    server.eligible("m1", "One");
    let roster = create_roster(&server, "Mining Op").await;

    let response = server
        .post_empty(&format!("/api/v1/attendance/{}/publish", roster.id))
        .await
        .unwrap();
    let published: Envelope<AttendanceBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(published.data.channel_id.as_deref(), Some("rosters"));
    assert!(published.data.message_id.is_some());
    assert_eq!(server.chat.sent().len(), 1);

    add(&server, &roster.id, "m1").await;
    let response = server
        .post_empty(&format!("/api/v1/attendance/{}/publish", roster.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    assert_eq!(server.chat.sent().len(), 1);
    assert_eq!(server.chat.edits().len(), 1);
}

#[tokio::test]
async fn test_publish_without_channel_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let roster = create_roster(&server, "Patrol").await;

    let response = server
        .post_empty(&format!("/api/v1/attendance/{}/publish", roster.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_chat_outage_is_bad_gateway() {
    let server = TestServer::start().await.unwrap();
    let roster = create_roster(&server, "Patrol").await;
    server.chat.set_failing(true);

    let response = server
        .post(
            &format!("/api/v1/attendance/{}/publish", roster.id),
            &serde_json::json!({ "channel_id": "c1" }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_GATEWAY).await.unwrap();
    assert_eq!(code, "CHAT_ERROR");
}

#[tokio::test]
async fn test_record_button_updates_message() {
    let server = TestServer::start().await.unwrap();
    let roster = create_roster(&server, "Mining Op").await;
    server
        .post(
            &format!("/api/v1/attendance/{}/publish", roster.id),
            &serde_json::json!({ "channel_id": "c1" }),
        )
        .await
        .unwrap();

    let response = server
        .post(
            "/api/v1/interactions",
            &Interaction::new("c1", &format!("attendance:record:{}", roster.id)),
        )
        .await
        .unwrap();
    let body: Envelope<InteractionBody> = assert_json(response, StatusCode::OK).await.unwrap();
    match body.data {
        InteractionBody::RosterUpdated { attendance } => assert!(attendance.recorded),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(server.chat.edits().len(), 1);
}

#[tokio::test]
async fn test_delete_button_removes_message() {
    let server = TestServer::start().await.unwrap();
    let roster = create_roster(&server, "Mining Op").await;
    server
        .post(
            &format!("/api/v1/attendance/{}/publish", roster.id),
            &serde_json::json!({ "channel_id": "c1" }),
        )
        .await
        .unwrap();

    let response = server
        .post(
            "/api/v1/interactions",
            &Interaction::new("c1", &format!("attendance:delete:{}", roster.id)),
        )
        .await
        .unwrap();
    let body: Envelope<InteractionBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(matches!(
        body.data,
        InteractionBody::RosterDeleted { ref attendance_id } if *attendance_id == roster.id
    ));
    assert!(server.chat.messages(&ChannelId::from("c1")).is_empty());
    assert!(server.attendance.is_empty());
}

#[tokio::test]
async fn test_delete_button_refused_on_recorded_roster() {
    let server = TestServer::start().await.unwrap();
    let roster = create_roster(&server, "Mining Op").await;
    server
        .post(
            &format!("/api/v1/attendance/{}/publish", roster.id),
            &serde_json::json!({ "channel_id": "c1" }),
        )
        .await
        .unwrap();
    let response = server
        .post_empty(&format!("/api/v1/attendance/{}/record", roster.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post(
            "/api/v1/interactions",
            &Interaction::new("c1", &format!("attendance:delete:{}", roster.id)),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_RECORDED");
    assert_eq!(server.chat.messages(&ChannelId::from("c1")).len(), 1);
    assert_eq!(server.attendance.len(), 1);
}

#[tokio::test]
async fn test_republish_elsewhere_removes_old_message() {
    let server = TestServer::start().await.unwrap();
    let roster = create_roster(&server, "Mining Op").await;
    for channel in ["c1", "c2"] {
        let response = server
            .post(
                &format!("/api/v1/attendance/{}/publish", roster.id),
                &serde_json::json!({ "channel_id": channel }),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    assert!(server.chat.messages(&ChannelId::from("c1")).is_empty());
    assert_eq!(server.chat.messages(&ChannelId::from("c2")).len(), 1);
}

#[tokio::test]
async fn test_unknown_custom_id_is_unprocessable() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post("/api/v1/interactions", &Interaction::new("c1", "poll:vote:1"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
    assert_eq!(code, "PARSE_FAILURE");
}

// ============================================================================
// Thread import
// ============================================================================

#[tokio::test]
async fn test_import_thread() {
    let server = TestServer::start().await.unwrap();
    server.eligible("m1", "One");
    server.with_issues("m2", "Two", &["guest"]);

    let opening = Message {
        author_id: Some(MemberId::from("u1")),
        ..Message::new("100", "parent", "Mining Op(abc123)")
    };
    server
        .chat
        .push_message(Message::new("101", "t1", "<@m1>\n<@!m2>"));
    server
        .chat
        .push_message(Message::new("102", "t1", "submitted").replying_to(opening));

    let response = server
        .post(
            "/api/v1/attendance/import",
            &serde_json::json!({ "channel_id": "t1" }),
        )
        .await
        .unwrap();
    let body: Envelope<AttendanceBody> = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(body.data.id, "abc123");
    assert_eq!(body.data.name, "Mining Op");
    assert_eq!(body.data.submitted_by, "u1");
    assert_eq!(body.data.member_ids(), vec!["m1"]);
    assert_eq!(body.data.issue_ids(), vec!["m2"]);

    let response = server.get("/api/v1/attendance/abc123").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // A second import must not clobber the stored roster
    server.eligible("m3", "Three");
    server
        .chat
        .push_message(Message::new("103", "t1", "<@m3>"));
    let reply = Message {
        author_id: Some(MemberId::from("u1")),
        ..Message::new("100", "parent", "Mining Op(abc123)")
    };
    server
        .chat
        .push_message(Message::new("104", "t1", "again").replying_to(reply));
    let response = server
        .post(
            "/api/v1/attendance/import",
            &serde_json::json!({ "channel_id": "t1" }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ATTENDANCE_EXISTS");

    let response = server.get("/api/v1/attendance/abc123").await.unwrap();
    let body: Envelope<AttendanceBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.member_ids(), vec!["m1"]);
}

#[tokio::test]
async fn test_import_short_thread_is_unprocessable() {
    let server = TestServer::start().await.unwrap();
    server
        .chat
        .push_message(Message::new("101", "t1", "<@m1>"));

    let response = server
        .post(
            "/api/v1/attendance/import",
            &serde_json::json!({ "channel_id": "t1" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
}

// ============================================================================
// Member directory
// ============================================================================

#[tokio::test]
async fn test_member_directory_feeds_rosters() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .put_json("/api/v1/members/m1", &UpsertMember::verified("One", "member"))
        .await
        .unwrap();
    let saved: Envelope<MemberDetailBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(saved.data.id, "m1");
    assert_eq!(saved.data.rank, "member");
    assert!(saved.data.issues.is_empty());

    let roster = create_roster(&server, "Mining Op").await;
    let roster = add(&server, &roster.id, "m1").await;
    assert_eq!(roster.member_ids(), vec!["m1"]);

    let response = server.get("/api/v1/members/m1").await.unwrap();
    let fetched: Envelope<MemberDetailBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.data.name, "One");
}

#[tokio::test]
async fn test_member_rank_list_and_delete() {
    let server = TestServer::start().await.unwrap();
    server.eligible("m2", "Bravo");
    server.eligible("m1", "Alpha");

    let response = server
        .put_json("/api/v1/members/m1/rank", &serde_json::json!({ "rank": "guest" }))
        .await
        .unwrap();
    let body: Envelope<MemberDetailBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.rank, "guest");
    assert_eq!(body.data.issues, vec!["guest"]);

    let response = server
        .put_json("/api/v1/members/m1/rank", &serde_json::json!({ "rank": "admiral" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get("/api/v1/members").await.unwrap();
    let listed: Envelope<Vec<MemberDetailBody>> =
        assert_json(response, StatusCode::OK).await.unwrap();
    let names: Vec<&str> = listed.data.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Bravo"]);

    let response = server.delete("/api/v1/members/m2").await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    let response = server.get("/api/v1/members/m2").await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_MEMBER");
}

#[tokio::test]
async fn test_member_upsert_rejects_empty_name() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .put_json("/api/v1/members/m1", &serde_json::json!({ "name": "" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(server.members.get(&MemberId::from("m1")).is_none());
}

// ============================================================================
// Voice events
// ============================================================================

#[tokio::test]
async fn test_voice_event_flow() {
    let server = TestServer::start().await.unwrap();
    server.eligible("m1", "Pilot");

    let response = server
        .post(
            "/api/v1/channels/vc1/event",
            &StartEvent::new("u1", &["m1", "m2"]),
        )
        .await
        .unwrap();
    let started: Envelope<EventBody> = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(started.data.channel_id, "vc1");
    assert!(started.data.message_id.is_some());
    let labels: Vec<&str> = started.data.attendees.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(labels, vec!["Pilot", "m2"]);
    assert!(started.data.attendees.iter().all(|a| a.attended));

    let response = server
        .post_empty("/api/v1/channels/vc1/event/toggle/m2")
        .await
        .unwrap();
    let toggled: Envelope<EventBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!toggled.data.attendees[1].attended);

    let response = server.post_empty("/api/v1/channels/vc1/event/submit").await.unwrap();
    let summary: Envelope<MessageBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(summary.data.content.contains("Pilot"));
    assert!(!summary.data.content.contains("m2"));

    let response = server.get("/api/v1/channels/vc1/event").await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_EVENT");
}

#[tokio::test]
async fn test_second_event_in_channel_conflicts() {
    let server = TestServer::start().await.unwrap();
    let body = StartEvent::new("u1", &["m1"]);
    let response = server.post("/api/v1/channels/vc1/event", &body).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/api/v1/channels/vc1/event", &body).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "EVENT_ALREADY_ACTIVE");
}

#[tokio::test]
async fn test_event_without_participants_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post("/api/v1/channels/vc1/event", &StartEvent::new("u1", &[]))
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "NO_PARTICIPANTS");
    assert_eq!(body.error.message, "No one is in voice chats!");
}

#[tokio::test]
async fn test_event_toggle_button_via_interaction() {
    let server = TestServer::start().await.unwrap();
    server
        .post("/api/v1/channels/vc1/event", &StartEvent::new("u1", &["m1"]))
        .await
        .unwrap();

    let response = server
        .post(
            "/api/v1/interactions",
            &Interaction::new("vc1", "event:attendance:toggle:m1"),
        )
        .await
        .unwrap();
    let body: Envelope<InteractionBody> = assert_json(response, StatusCode::OK).await.unwrap();
    match body.data {
        InteractionBody::EventUpdated { event } => assert!(!event.attendees[0].attended),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let response = server
        .post(
            "/api/v1/interactions",
            &Interaction::new("vc1", "event:attendance:submit"),
        )
        .await
        .unwrap();
    let body: Envelope<InteractionBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(matches!(body.data, InteractionBody::EventSubmitted { .. }));
    assert!(server.events.get(&ChannelId::from("vc1")).is_none());
}
