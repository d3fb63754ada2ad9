//! Integration tests for the news backend.

use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::db::{init_database, seed, Repository};
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        // Initialize and seed database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        seed::seed(&pool, &seed::SeedData::reference().expect("Bad seed data"))
            .await
            .expect("Failed to seed DB");

        let state = AppState {
            repo: Arc::new(Repository::new(pool.clone())),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            pool,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn patch(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .patch(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }
}

fn article_1() -> Value {
    json!({
        "article_id": 1,
        "title": "Living in the shadow of a great man",
        "topic": "mitch",
        "author": "butter_bridge",
        "body": "I find this existence challenging",
        "comment_count": 11,
        "created_at": "2020-07-09T20:11:00.000Z",
        "votes": 100
    })
}

// ==================== ROUTING ====================

#[tokio::test]
async fn test_invalid_endpoint() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/iDontExist").await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({ "msg": "Invalid endpoint." }));
}

#[tokio::test]
async fn test_invalid_endpoint_any_method() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/iDontExist"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "Invalid endpoint.");

    let resp = fixture
        .client
        .delete(fixture.url("/nowhere"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "Invalid endpoint.");
}

#[tokio::test]
async fn test_unregistered_method_on_known_path() {
    let fixture = TestFixture::new().await;

    for (method, path) in [
        (reqwest::Method::DELETE, "/api/topics"),
        (reqwest::Method::POST, "/api/users"),
        (reqwest::Method::PUT, "/api/articles/1"),
        (reqwest::Method::DELETE, "/api/articles/1"),
    ] {
        let resp = fixture
            .client
            .request(method.clone(), fixture.url(path))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 404, "{} {}", method, path);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["msg"], "Invalid endpoint.");
    }
}

#[tokio::test]
async fn test_nested_unknown_path() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/users/notARoute").await;
    assert_eq!(status, 404);
    assert_eq!(body["msg"], "Invalid endpoint.");

    let (status, body) = fixture.get("/api/articles").await;
    assert_eq!(status, 404);
    assert_eq!(body["msg"], "Invalid endpoint.");
}

// ==================== TOPICS ====================

#[tokio::test]
async fn test_list_topics() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/topics").await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "topics": [
                { "slug": "mitch", "description": "The man, the Mitch, the legend" },
                { "slug": "cats", "description": "Not dogs" },
                { "slug": "paper", "description": "what books are made of" }
            ]
        })
    );
}

// ==================== ARTICLES ====================

#[tokio::test]
async fn test_get_article() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/articles/1").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "article": article_1() }));
}

#[tokio::test]
async fn test_get_article_without_comments() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/articles/2").await;
    assert_eq!(status, 200);
    assert_eq!(body["article"]["article_id"], 2);
    assert_eq!(body["article"]["comment_count"], 0);
}

#[tokio::test]
async fn test_get_article_not_found() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/articles/9001").await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({ "msg": "article_id does not exist" }));

    let (status, body) = fixture.get("/api/articles/-1").await;
    assert_eq!(status, 404);
    assert_eq!(body["msg"], "article_id does not exist");
}

#[tokio::test]
async fn test_get_article_bad_id() {
    let fixture = TestFixture::new().await;

    for path in ["/api/articles/imNotAnID", "/api/articles/1.5", "/api/articles/1abc"] {
        let (status, body) = fixture.get(path).await;
        assert_eq!(status, 400, "{}", path);
        assert_eq!(body, json!({ "msg": "Bad request" }));
    }
}

#[tokio::test]
async fn test_patch_article_votes() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .patch("/api/articles/1", json!({ "inc_votes": 5 }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "article_id": 1,
            "title": "Living in the shadow of a great man",
            "topic": "mitch",
            "author": "butter_bridge",
            "body": "I find this existence challenging",
            "created_at": "2020-07-09T20:11:00.000Z",
            "votes": 105
        })
    );
    assert!(body.get("comment_count").is_none());
}

#[tokio::test]
async fn test_patch_votes_round_trip() {
    let fixture = TestFixture::new().await;

    let (status, _) = fixture
        .patch("/api/articles/1", json!({ "inc_votes": 5 }))
        .await;
    assert_eq!(status, 200);

    let (status, body) = fixture
        .patch("/api/articles/1", json!({ "inc_votes": -5 }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["votes"], 100);

    let (_, body) = fixture.get("/api/articles/1").await;
    assert_eq!(body, json!({ "article": article_1() }));
}

#[tokio::test]
async fn test_patch_votes_can_go_negative() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .patch("/api/articles/2", json!({ "inc_votes": -10 }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["votes"], -10);
}

#[tokio::test]
async fn test_patch_ignores_extra_keys() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .patch(
            "/api/articles/1",
            json!({ "inc_votes": 1, "title": "Renamed", "votes": 0 }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["votes"], 101);
    assert_eq!(body["title"], "Living in the shadow of a great man");
}

#[tokio::test]
async fn test_patch_bad_body() {
    let fixture = TestFixture::new().await;

    for bad in [
        json!({}),
        json!({ "inc_votes": "word" }),
        json!({ "inc_votes": null }),
        json!({ "inc_votes": 1.5 }),
        json!([{ "inc_votes": 1 }]),
    ] {
        let (status, body) = fixture.patch("/api/articles/1", bad.clone()).await;
        assert_eq!(status, 400, "{}", bad);
        assert_eq!(body, json!({ "msg": "Bad request" }));
    }

    // No mutation happened
    let (_, body) = fixture.get("/api/articles/1").await;
    assert_eq!(body["article"]["votes"], 100);
}

#[tokio::test]
async fn test_patch_missing_body() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .patch(fixture.url("/api/articles/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "Bad request");

    let resp = fixture
        .client
        .patch(fixture.url("/api/articles/1"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "Bad request");
}

#[tokio::test]
async fn test_patch_vote_overflow_is_rejected() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .patch(fixture.url("/api/articles/1"))
        .header("content-type", "application/json")
        .body(r#"{"inc_votes": 9223372036854775807}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "msg": "Bad request" }));

    // The article is still readable and unchanged
    let (status, body) = fixture.get("/api/articles/1").await;
    assert_eq!(status, 200);
    assert_eq!(body["article"]["votes"], 100);

    let (status, body) = fixture
        .patch("/api/articles/1", json!({ "inc_votes": -1 }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["votes"], 99);
}

#[tokio::test]
async fn test_patch_bad_id() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .patch("/api/articles/imNotAnID", json!({ "inc_votes": 1 }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["msg"], "Bad request");
}

#[tokio::test]
async fn test_patch_not_found() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .patch("/api/articles/9001", json!({ "inc_votes": 2 }))
        .await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({ "msg": "Article not found" }));
}

#[tokio::test]
async fn test_not_found_messages_differ() {
    let fixture = TestFixture::new().await;

    let (_, get_body) = fixture.get("/api/articles/9001").await;
    let (_, patch_body) = fixture
        .patch("/api/articles/9001", json!({ "inc_votes": 1 }))
        .await;
    assert_ne!(get_body["msg"], patch_body["msg"]);
}

#[tokio::test]
async fn test_patch_validates_before_lookup() {
    let fixture = TestFixture::new().await;

    // A bad body on a missing article is still a 400, not a 404
    let (status, body) = fixture
        .patch("/api/articles/9001", json!({ "inc_votes": "word" }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["msg"], "Bad request");
}

// ==================== USERS ====================

#[tokio::test]
async fn test_list_users() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get("/api/users").await;
    assert_eq!(status, 200);
    assert!(body.is_array());
    assert_eq!(
        body,
        json!([
            {
                "username": "butter_bridge",
                "name": "jonny",
                "avatar_url": "https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg"
            },
            {
                "username": "icellusedkars",
                "name": "sam",
                "avatar_url": "https://avatars2.githubusercontent.com/u/24604688?s=460&v=4"
            },
            {
                "username": "rogersop",
                "name": "paul",
                "avatar_url": "https://avatars2.githubusercontent.com/u/24394918?s=400&v=4"
            },
            {
                "username": "lurker",
                "name": "do_nothing",
                "avatar_url": "https://www.golenbock.com/wp-content/uploads/2015/01/placeholder-user.png"
            }
        ])
    );
}

// ==================== INTERNAL ERRORS ====================

#[tokio::test]
async fn test_unreachable_store_is_500() {
    let fixture = TestFixture::new().await;
    fixture.pool.close().await;

    for path in ["/api/topics", "/api/users", "/api/articles/1"] {
        let (status, body) = fixture.get(path).await;
        assert_eq!(status, 500, "{}", path);
        assert_eq!(body, json!({ "msg": "Internal server error" }));
    }

    // Validation still runs first
    let (status, _) = fixture.get("/api/articles/imNotAnID").await;
    assert_eq!(status, 400);
}
