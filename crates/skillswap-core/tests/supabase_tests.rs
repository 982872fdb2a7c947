//! Supabase adapter tests against a mock server

use chrono::{TimeZone, Utc};
use serde_json::json;
use skillswap_core::{
    Error,
    domain::auth::{AuthProvider, Session},
    domain::profiles::{ProfileStore, ProfileUpdate},
    domain::skills::{NewSkill, SkillSource},
    infrastructure::{SupabaseAuth, SupabaseClient, SupabaseProfileStore, SupabaseSkillSource},
};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANON_KEY: &str = "anon-key";

fn client(server: &MockServer) -> SupabaseClient {
    SupabaseClient::builder()
        .base_url(server.uri())
        .anon_key(ANON_KEY)
        .timeout_secs(5)
        .build()
        .unwrap()
}

fn new_skill() -> NewSkill {
    NewSkill {
        title: "Guitar Basics".to_string(),
        description: "Chords and strumming".to_string(),
        category: "Music".to_string(),
        location: "Accra".to_string(),
        tags: vec!["acoustic".to_string()],
        level: None,
        exchange_type: None,
        image_url: None,
        user_id: "u1".to_string(),
        user_name: "Ama".to_string(),
        user_avatar: None,
    }
}

fn session(token: &str) -> Session {
    Session {
        user: skillswap_core::domain::auth::AuthUser {
            id: "u1".to_string(),
            email: "ama@example.com".to_string(),
            full_name: None,
            avatar_url: None,
        },
        access_token: token.to_string(),
        refresh_token: None,
        expires_at: None,
    }
}

#[tokio::test]
async fn test_fetch_approved_sends_filter_and_keys() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/Skills"))
        .and(query_param("select", "*"))
        .and(query_param("approved", "eq.true"))
        .and(header("apikey", ANON_KEY))
        .and(header("authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "title": "Guitar Basics",
                "category": "Music",
                "tags": ["acoustic"],
                "location": "Accra",
                "created_at": "2024-05-01T12:00:00+00:00",
                "approved": true
            },
            { "id": 2, "approved": true }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let source = SupabaseSkillSource::new(client(&server), "Skills");
    let skills = source.fetch_approved().await.unwrap();

    assert_eq!(skills.len(), 2);
    assert_eq!(skills[0].id, "1");
    assert_eq!(
        skills[0].created_at,
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    );
    // Missing fields normalize to defaults
    assert_eq!(skills[1].title, "Untitled");
    assert!(skills[1].tags.is_empty());
    assert_eq!(skills[1].price, 0.0);
}

#[tokio::test]
async fn test_fetch_by_id_limits_to_one_row() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/Skills"))
        .and(query_param("id", "eq.abc"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let source = SupabaseSkillSource::new(client(&server), "Skills");
    assert!(source.fetch_by_id("abc").await.unwrap().is_none());
}

#[tokio::test]
async fn test_fetch_by_malformed_id_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/Skills"))
        .and(query_param("id", "eq.not-a-uuid"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "22P02",
            "message": "invalid input syntax for type uuid: \"not-a-uuid\"",
            "details": null,
            "hint": null
        })))
        .mount(&server)
        .await;

    let source = SupabaseSkillSource::new(client(&server), "Skills");
    assert!(source.fetch_by_id("not-a-uuid").await.unwrap().is_none());
}

#[tokio::test]
async fn test_fetch_by_user_orders_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/Skills"))
        .and(query_param("user_id", "eq.u1"))
        .and(query_param("approved", "eq.true"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "b", "user_id": "u1", "approved": true },
            { "id": "a", "user_id": "u1", "approved": true }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let source = SupabaseSkillSource::new(client(&server), "Skills");
    let skills = source.fetch_by_user("u1").await.unwrap();
    assert_eq!(skills.len(), 2);
    assert_eq!(skills[0].id, "b");
}

#[tokio::test]
async fn test_fetch_tags_selects_tag_column() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/Skills"))
        .and(query_param("select", "tags,approved"))
        .and(query_param("approved", "eq.true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "tags": ["b", "a"], "approved": true },
            { "tags": null, "approved": true },
            { "tags": ["hidden"], "approved": false },
            { "tags": ["a"], "approved": true }
        ])))
        .mount(&server)
        .await;

    let source = SupabaseSkillSource::new(client(&server), "Skills");
    let tag_sets = source.fetch_approved_tags().await.unwrap();
    assert_eq!(tag_sets.len(), 3);
    assert!(tag_sets[1].is_empty());
    assert!(tag_sets.iter().flatten().all(|tag| tag != "hidden"));
}

#[tokio::test]
async fn test_create_posts_approved_row_with_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/Skills"))
        .and(header("prefer", "return=representation"))
        .and(body_partial_json(json!({
            "title": "Guitar Basics",
            "level": "Beginner",
            "exchange_type": "Free",
            "approved": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": "new-id",
            "title": "Guitar Basics",
            "level": "Beginner",
            "exchange_type": "Free",
            "approved": true
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let source = SupabaseSkillSource::new(client(&server), "Skills");
    let created = source.create(&new_skill()).await.unwrap();
    assert_eq!(created.id, "new-id");
    assert!(created.approved);
}

#[tokio::test]
async fn test_backend_error_carries_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/Skills"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint",
            "details": null,
            "hint": null
        })))
        .mount(&server)
        .await;

    let source = SupabaseSkillSource::new(client(&server), "Skills");
    let err = source.create(&new_skill()).await.unwrap_err();
    match err {
        Error::Backend { status, message } => {
            assert_eq!(status, 409);
            assert!(message.contains("duplicate"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/Skills"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let source = SupabaseSkillSource::new(client(&server), "Skills");
    let err = source.fetch_approved().await.unwrap_err();
    assert_eq!(err.code(), "E102");
}

#[tokio::test]
async fn test_profile_get_and_update() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("uid", "eq.u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "uid": "u1",
            "full_name": "Ama Mensah",
            "email": "ama@example.com",
            "created_at": "2024-01-01T00:00:00Z"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/users"))
        .and(query_param("uid", "eq.u1"))
        .and(header("prefer", "return=representation"))
        .and(body_partial_json(json!({ "bio": "Painter" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "uid": "u1",
            "full_name": "Ama Mensah",
            "email": "ama@example.com",
            "created_at": "2024-01-01T00:00:00Z",
            "bio": "Painter"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let store = SupabaseProfileStore::new(client(&server), "users");
    let profile = store.get("u1").await.unwrap().unwrap();
    assert_eq!(profile.full_name, "Ama Mensah");

    let updated = store
        .update(
            "u1",
            &ProfileUpdate {
                bio: Some("Painter".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.bio.as_deref(), Some("Painter"));
}

#[tokio::test]
async fn test_profile_update_without_row_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let store = SupabaseProfileStore::new(client(&server), "users");
    let err = store
        .update(
            "ghost",
            &ProfileUpdate {
                bio: Some("x".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ProfileNotFound(_)));
}

#[tokio::test]
async fn test_sign_in_sets_bearer_for_rest_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(body_partial_json(json!({ "email": "ama@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "user-jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh",
            "user": {
                "id": "u1",
                "email": "ama@example.com",
                "user_metadata": { "full_name": "Ama Mensah" }
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/Skills"))
        .and(header("authorization", "Bearer user-jwt"))
        .and(header("apikey", ANON_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let auth = SupabaseAuth::new(client.clone());
    let session = auth.sign_in("ama@example.com", "secret123").await.unwrap();
    assert_eq!(session.user.full_name.as_deref(), Some("Ama Mensah"));
    assert!(session.expires_at.is_some());

    let source = SupabaseSkillSource::new(client, "Skills");
    source.fetch_approved().await.unwrap();
}

#[tokio::test]
async fn test_rejected_sign_in_is_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let auth = SupabaseAuth::new(client(&server));
    let err = auth.sign_in("ama@example.com", "nope-nope").await.unwrap_err();
    assert!(matches!(err, Error::AuthFailed(ref m) if m == "Invalid login credentials"));
}

#[tokio::test]
async fn test_sign_up_sends_full_name_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .and(body_partial_json(json!({ "data": { "full_name": "Ama Mensah" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "email": "ama@example.com",
            "user_metadata": { "full_name": "Ama Mensah" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = SupabaseAuth::new(client(&server));
    let user = auth
        .sign_up("ama@example.com", "secret123", "Ama Mensah")
        .await
        .unwrap();
    assert_eq!(user.id, "u1");
}

#[tokio::test]
async fn test_current_user_with_revoked_token_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "msg": "invalid JWT"
        })))
        .mount(&server)
        .await;

    let auth = SupabaseAuth::new(client(&server));
    assert!(auth.current_user(&session("stale")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_sign_out_clears_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header("authorization", "Bearer user-jwt"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client.set_access_token(Some("user-jwt".to_string()));
    let auth = SupabaseAuth::new(client.clone());
    auth.sign_out(&session("user-jwt")).await.unwrap();
    assert!(client.access_token().is_none());
}
