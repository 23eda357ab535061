//! Router tests: every request goes through the full middleware stack
//!
//! Each admin route gets checked three ways where it matters:
//! 1. as the seeded admin (succeeds)
//! 2. as a signed-in non-admin (403)
//! 3. without a token (401)

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

use crate::common::TestHarness;
use directory_core::common::ResourceId;
use directory_core::domains::engagement::session::RECENT_SEARCHES_KEY;
use directory_core::domains::resources::ResourceStatus;
use directory_core::kernel::test_dependencies::{TEST_ADMIN_TOKEN, TEST_VISITOR_TOKEN};
use directory_core::kernel::BaseClientStorage;
use directory_core::server::FILE_NAME_HEADER;
use serde_json::json;
use test_context::test_context;

// ============================================================================
// Public routes
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn health_reports_store_counts(ctx: &TestHarness) {
    let (status, body) = ctx.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"]["resources"], 4);
    assert_eq!(body["store"]["prompts"], 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn health_degrades_when_backend_is_down(ctx: &TestHarness) {
    ctx.deps.data_store.fail_fetches(true);

    let (status, body) = ctx.get("/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["backend"]["status"], "error");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn resources_are_filtered_and_sorted_by_query(ctx: &TestHarness) {
    let (status, body) = ctx.get("/resources?sort=title-az").await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Compiler Notes", "Prompting Guide", "Secret Sauce"]);

    let (_, body) = ctx.get("/resources?q=grace").await;
    let ids: Vec<_> = body.as_array().unwrap().iter().map(|r| r["id"].clone()).collect();
    assert_eq!(ids, vec![json!("r3")]);

    let (_, body) = ctx.get("/resources?category=Design").await;
    assert!(body.as_array().unwrap().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn hidden_creators_are_not_listed(ctx: &TestHarness) {
    let (status, body) = ctx.get("/creators").await;

    assert_eq!(status, StatusCode::OK);
    let slugs: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(slugs, vec!["ada-lovelace", "grace-hopper"]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn creator_profile_lists_only_visible_resources(ctx: &TestHarness) {
    let (status, body) = ctx.get("/creators/ada-lovelace").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["creator"]["displayName"], "Ada Lovelace");
    assert_eq!(body["resources"].as_array().unwrap().len(), 1);
    assert_eq!(body["resources"][0]["id"], "r1");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_creator_is_not_found(ctx: &TestHarness) {
    let (status, body) = ctx.get("/creators/nobody").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("nobody"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn suggestions_include_trending_tags(ctx: &TestHarness) {
    let (status, body) = ctx.get("/suggestions?q=python").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"][0]["label"], "Python Scripts");
    assert_eq!(body["suggestions"][0]["category"], "Coding");
    assert_eq!(body["trendingTags"].as_array().unwrap().len(), 6);
    assert_eq!(body["categories"][0], "All");
    assert_eq!(body["categories"].as_array().unwrap().len(), 5);
}

// ============================================================================
// Admin routes
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn stats_require_a_session(ctx: &TestHarness) {
    let (status, _) = ctx.get("/admin/stats").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn stats_require_an_admin(ctx: &TestHarness) {
    let (status, _) = ctx
        .request(Method::GET, "/admin/stats", Some(TEST_VISITOR_TOKEN), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_tokens_are_unauthenticated(ctx: &TestHarness) {
    let (status, _) = ctx
        .request(Method::GET, "/admin/stats", Some("stale-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn stats_count_the_seeded_catalog(ctx: &TestHarness) {
    let (status, body) = ctx
        .request(Method::GET, "/admin/stats", Some(TEST_ADMIN_TOKEN), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "pending": 1, "deadLinks": 0, "live": 3, "prompts": 1 })
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn admin_list_filters_by_status(ctx: &TestHarness) {
    let (status, body) = ctx
        .request(
            Method::GET,
            "/admin/resources?status=pending",
            Some(TEST_ADMIN_TOKEN),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], "r2");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn admin_live_search_matches_usernames(ctx: &TestHarness) {
    let (status, body) = ctx
        .request(
            Method::GET,
            "/admin/resources?status=live&q=%40ADALOVELACE",
            Some(TEST_ADMIN_TOKEN),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], "r1");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn approve_without_edits_publishes(ctx: &TestHarness) {
    let (status, body) = ctx
        .request(
            Method::POST,
            "/admin/resources/r2/approve",
            Some(TEST_ADMIN_TOKEN),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "live");
    assert_eq!(body["isHidden"], false);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn approve_with_edits_merges_them(ctx: &TestHarness) {
    let (status, body) = ctx
        .request(
            Method::POST,
            "/admin/resources/r2/approve",
            Some(TEST_ADMIN_TOKEN),
            Some(json!({ "title": "Agent Starter Kit v2" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Agent Starter Kit v2");
    assert_eq!(body["status"], "live");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn approve_refuses_edits_with_unknown_fields(ctx: &TestHarness) {
    let (status, body) = ctx
        .request(
            Method::POST,
            "/admin/resources/r2/approve",
            Some(TEST_ADMIN_TOKEN),
            Some(json!({ "title": "Reviewed title", "tittle_typo": "x" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let r2 = ctx
        .directory()
        .store
        .resources
        .get(&ResourceId::from("r2"))
        .await
        .unwrap();
    assert_eq!(r2.status, ResourceStatus::Pending);
    assert_eq!(r2.title, "Agent Starter Kit");
    assert!(ctx.deps.data_store.calls().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn invalid_transitions_conflict(ctx: &TestHarness) {
    let (status, body) = ctx
        .request(
            Method::POST,
            "/admin/resources/r1/reject",
            Some(TEST_ADMIN_TOKEN),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn backend_write_failures_are_bad_gateway(ctx: &TestHarness) {
    ctx.deps.data_store.fail_deletes(true);

    let (status, _) = ctx
        .request(
            Method::DELETE,
            "/admin/resources/r1",
            Some(TEST_ADMIN_TOKEN),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(ctx.directory().store.resources.len().await, 4);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn health_reports_flag_dead_links(ctx: &TestHarness) {
    let (status, body) = ctx
        .request(
            Method::POST,
            "/admin/resources/r3/health",
            Some(TEST_ADMIN_TOKEN),
            Some(json!({ "health": "error" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["health"], "error");

    let (_, stats) = ctx
        .request(Method::GET, "/admin/stats", Some(TEST_ADMIN_TOKEN), None)
        .await;
    assert_eq!(stats["deadLinks"], 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn creators_can_be_verified_and_hidden(ctx: &TestHarness) {
    let (status, body) = ctx
        .request(
            Method::POST,
            "/admin/creators/c2/hide",
            Some(TEST_ADMIN_TOKEN),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isHidden"], true);

    let (_, creators) = ctx.get("/creators").await;
    assert_eq!(creators.as_array().unwrap().len(), 1);

    let (_, body) = ctx
        .request(
            Method::POST,
            "/admin/creators/c2/verify",
            Some(TEST_ADMIN_TOKEN),
            None,
        )
        .await;
    assert_eq!(body["isVerified"], false);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_patch_fields_are_rejected(ctx: &TestHarness) {
    let (status, _) = ctx
        .request(
            Method::PATCH,
            "/admin/resources/r1",
            Some(TEST_ADMIN_TOKEN),
            Some(json!({ "status": "live" })),
        )
        .await;

    assert!(status.is_client_error());
    assert!(ctx.deps.data_store.calls().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn prompts_can_be_added_and_removed(ctx: &TestHarness) {
    let (status, created) = ctx
        .request(
            Method::POST,
            "/admin/prompts",
            Some(TEST_ADMIN_TOKEN),
            Some(json!({ "type": "video", "title": "Neon city", "prompt": "a neon city" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["type"], "video");
    let id = created["id"].as_str().unwrap().to_string();

    let (_, prompts) = ctx.get("/prompts").await;
    assert_eq!(prompts.as_array().unwrap().len(), 2);

    let (status, _) = ctx
        .request(
            Method::DELETE,
            &format!("/admin/prompts/{}", id),
            Some(TEST_ADMIN_TOKEN),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, prompts) = ctx.get("/prompts").await;
    assert_eq!(prompts.as_array().unwrap().len(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn uploads_return_a_public_url(ctx: &TestHarness) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/admin/uploads/avatars")
        .header("authorization", format!("Bearer {}", TEST_ADMIN_TOKEN))
        .header(FILE_NAME_HEADER, "portrait.png")
        .body(Body::from(vec![0x89, 0x50, 0x4e, 0x47]))
        .unwrap();

    let response = ctx.router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let uploads = ctx.deps.blob_store.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].bucket, "avatars");
    assert_eq!(uploads[0].content_type, "image/png");
    assert!(uploads[0].path.ends_with(".png"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn uploads_to_unknown_buckets_are_rejected(ctx: &TestHarness) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/admin/uploads/videos")
        .header("authorization", format!("Bearer {}", TEST_ADMIN_TOKEN))
        .body(Body::from(vec![1, 2, 3]))
        .unwrap();

    let response = ctx.router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(ctx.deps.blob_store.uploads().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn refresh_reloads_every_collection(ctx: &TestHarness) {
    let (status, body) = ctx
        .request(Method::POST, "/admin/refresh", Some(TEST_ADMIN_TOKEN), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "creators": 3, "resources": 4, "prompts": 1 }));
}

// ============================================================================
// Session routes
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn unlocks_stop_at_the_daily_limit(ctx: &TestHarness) {
    for remaining in [2, 1, 0] {
        let (status, body) = ctx.request(Method::POST, "/session/unlock", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "outcome": "allowed", "remaining": remaining }));
    }

    let (_, body) = ctx.request(Method::POST, "/session/unlock", None, None).await;
    assert_eq!(body, json!({ "outcome": "limited" }));

    let (_, session) = ctx.get("/session").await;
    assert_eq!(session["gate"]["countToday"], 3);
    assert_eq!(session["dailyLimit"], 3);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn recent_searches_are_persisted(ctx: &TestHarness) {
    for term in ["figma", "python", "figma"] {
        ctx.request(
            Method::POST,
            "/session/searches",
            None,
            Some(json!({ "term": term })),
        )
        .await;
    }

    let (_, session) = ctx.get("/session").await;
    assert_eq!(session["recentSearches"], json!(["figma", "python"]));
    assert_eq!(
        ctx.storage.get(RECENT_SEARCHES_KEY).unwrap().as_deref(),
        Some(r#"["figma","python"]"#)
    );

    let (_, session) = ctx
        .request(Method::DELETE, "/session/searches?term=python", None, None)
        .await;
    assert_eq!(session["recentSearches"], json!(["figma"]));

    let (_, session) = ctx.request(Method::DELETE, "/session/searches", None, None).await;
    assert_eq!(session["recentSearches"], json!([]));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn theme_toggles_when_none_is_given(ctx: &TestHarness) {
    let (_, session) = ctx.get("/session").await;
    assert_eq!(session["theme"], "dark");

    let (_, session) = ctx
        .request(Method::PUT, "/session/theme", None, Some(json!({})))
        .await;
    assert_eq!(session["theme"], "light");

    let (_, session) = ctx
        .request(
            Method::PUT,
            "/session/theme",
            None,
            Some(json!({ "theme": "light" })),
        )
        .await;
    assert_eq!(session["theme"], "light");
}
