//! End-to-end tests over a real socket.

use bucketlist::auth::TokenIssuer;
use bucketlist::clock::FixedClock;
use bucketlist::server::{build_router, AppState};
use bucketlist::storage::ConnectionPool;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpListener;

const SECRET: &[u8] = b"integration-secret";

fn pool() -> ConnectionPool {
    ConnectionPool::open_memory(Duration::from_secs(2)).unwrap()
}

fn state_at(pool: &ConnectionPool, year: i32, month: u32, day: u32) -> AppState {
    AppState::new(pool.clone(), TokenIssuer::new(SECRET))
        .with_clock(FixedClock::at_date(year, month, day).unwrap())
}

async fn spawn(state: AppState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

struct Api {
    base: String,
    client: Client,
}

impl Api {
    async fn start(state: AppState) -> Self {
        Self {
            base: spawn(state).await,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn call(
        &self,
        method: reqwest::Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = self.client.request(method, self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.unwrap();
        let status = response.status();
        let text = response.text().await.unwrap();
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap()
        };
        (status, body)
    }

    async fn get(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.call(reqwest::Method::GET, path, Some(token), None).await
    }

    async fn post(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.call(reqwest::Method::POST, path, token, Some(body)).await
    }

    async fn patch(&self, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.call(reqwest::Method::PATCH, path, Some(token), Some(body)).await
    }

    async fn delete(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.call(reqwest::Method::DELETE, path, Some(token), None).await
    }

    async fn signup(&self, email: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/signup",
                None,
                json!({ "email": email, "password": "secret1" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/login",
                None,
                json!({ "email": email, "password": "secret1" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    async fn create(&self, token: &str, title: &str, category: &str) -> Value {
        let (status, body) = self
            .post(
                "/api/bucket-items",
                Some(token),
                json!({ "title": title, "category": category }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }
}

fn id(item: &Value) -> i64 {
    item["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_reports_service() {
    let api = Api::start(state_at(&pool(), 2026, 4, 1)).await;
    let response = api.client.get(api.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "bucket-list-backend");
    assert!(body["timestamp"].as_str().unwrap().starts_with("2026-04-01"));
}

#[tokio::test]
async fn signup_and_login() {
    let api = Api::start(state_at(&pool(), 2026, 4, 1)).await;

    let (status, body) = api
        .post(
            "/api/auth/signup",
            None,
            json!({ "email": "a@b.com", "password": "secret1", "full_name": "Ana" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], "a@b.com");
    assert_eq!(body["user"]["full_name"], "Ana");
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = api
        .post("/api/auth/login", None, json!({ "email": "a@b.com", "password": "secret1" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());

    let (status, body) = api
        .post("/api/auth/login", None, json!({ "email": "a@b.com", "password": "wrong-one" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Invalid credentials" }));

    let (status, body) = api
        .post("/api/auth/login", None, json!({ "email": "ghost@b.com", "password": "secret1" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Invalid credentials" }));
}

#[tokio::test]
async fn signup_validation_and_conflict() {
    let api = Api::start(state_at(&pool(), 2026, 4, 1)).await;

    let cases = [
        (json!({ "password": "secret1" }), "Email and password required"),
        (json!({ "email": "not-an-email", "password": "secret1" }), "Invalid email address"),
        (
            json!({ "email": "c@d.com", "password": "12345" }),
            "Password must be at least 6 characters",
        ),
    ];
    for (body, message) in cases {
        let (status, response) = api.post("/api/auth/signup", None, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], message);
    }

    api.signup("dup@example.com").await;
    let (status, body) = api
        .post(
            "/api/auth/signup",
            None,
            json!({ "email": "DUP@example.com", "password": "secret1" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "Email already registered" }));
}

#[tokio::test]
async fn token_is_required_and_checked() {
    let api = Api::start(state_at(&pool(), 2026, 4, 1)).await;

    let (status, _) = api
        .call(reqwest::Method::GET, "/api/bucket-items", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = api.get("/api/bucket-items", "not.a.token").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Invalid or expired token" }));

    let foreign = TokenIssuer::new(b"other-secret")
        .issue(1, FixedClock::at_date(2026, 4, 1).unwrap().0)
        .unwrap();
    let (status, _) = api.get("/api/bucket-items", &foreign).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn item_crud_flow() {
    let api = Api::start(state_at(&pool(), 2026, 4, 1)).await;
    let token = api.signup("crud@example.com").await;

    let first = api.create(&token, "Run a marathon", "upcoming_year").await;
    assert_eq!(first["priority"], 1);
    assert_eq!(first["goal_year"], 2026);
    assert_eq!(first["completed"], false);
    assert_eq!(first["archived"], false);

    let second = api.create(&token, "Visit Kyoto", "upcoming_year").await;
    assert_eq!(second["priority"], 2);

    let someday = api.create(&token, "Learn the cello", "general").await;
    assert_eq!(someday["priority"], 1);
    assert!(someday["goal_year"].is_null());

    let (status, items) = api.get("/api/bucket-items", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(items.as_array().unwrap().len(), 3);

    let (status, general) = api.get("/api/bucket-items/category/general", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(general.as_array().unwrap().len(), 1);

    let path = format!("/api/bucket-items/{}", id(&first));
    let (status, done) = api.patch(&path, &token, json!({ "completed": true })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["completed"], true);
    assert!(done["completed_at"].is_i64());

    let (_, items) = api.get("/api/bucket-items", &token).await;
    assert_eq!(items[2]["id"], first["id"], "completed items sort last");

    let (_, reopened) = api.patch(&path, &token, json!({ "completed": false })).await;
    assert!(reopened["completed_at"].is_null());

    let (status, moved) = api
        .patch(
            &format!("/api/bucket-items/{}", id(&someday)),
            &token,
            json!({ "category": "upcoming_year", "title": "Learn the cello, properly" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["goal_year"], 2026);
    assert_eq!(moved["title"], "Learn the cello, properly");

    let (status, body) = api.delete(&path, &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = api.get(&path, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Item not found" }));

    let (status, _) = api.delete(&path, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn item_validation_errors() {
    let api = Api::start(state_at(&pool(), 2026, 4, 1)).await;
    let token = api.signup("valid@example.com").await;

    let cases = [
        (json!({ "category": "general" }), "Title and category are required"),
        (json!({ "title": "x" }), "Title and category are required"),
        (json!({ "title": "x", "category": "later" }), "Invalid category"),
        (json!({ "title": "x", "category": "general", "status": "done" }), "Invalid status"),
    ];
    for (body, message) in cases {
        let (status, response) = api.post("/api/bucket-items", Some(&token), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], message);
    }

    let (status, _) = api.get("/api/bucket-items/category/someday", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = api.get("/api/bucket-items/-4", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid item ID" }));

    let response = api
        .client
        .post(api.url("/api/bucket-items"))
        .bearer_auth(&token)
        .header("content-type", "application/json")
        .body("{\"title\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn items_are_isolated_per_user() {
    let api = Api::start(state_at(&pool(), 2026, 4, 1)).await;
    let alice = api.signup("alice@example.com").await;
    let bob = api.signup("bob@example.com").await;

    let item = api.create(&alice, "Alice's secret goal", "general").await;
    let path = format!("/api/bucket-items/{}", id(&item));

    let (_, bobs) = api.get("/api/bucket-items", &bob).await;
    assert_eq!(bobs, json!([]));

    let (status, _) = api.get(&path, &bob).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = api.patch(&path, &bob, json!({ "title": "mine now" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = api.delete(&path, &bob).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, still_there) = api.get(&path, &alice).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(still_there["title"], "Alice's secret goal");
}

#[tokio::test]
async fn reorder_is_all_or_nothing() {
    let api = Api::start(state_at(&pool(), 2026, 4, 1)).await;
    let alice = api.signup("order@example.com").await;
    let bob = api.signup("other@example.com").await;

    let a = api.create(&alice, "a", "general").await;
    let b = api.create(&alice, "b", "general").await;
    let c = api.create(&alice, "c", "general").await;
    let foreign = api.create(&bob, "bob's", "general").await;

    let (status, body) = api
        .post(
            "/api/bucket-items/reorder",
            Some(&alice),
            json!({ "items": [
                { "id": id(&c), "priority": 0 },
                { "id": id(&a), "priority": 1 },
                { "id": id(&b), "priority": 2 },
            ]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Items reordered successfully" }));

    let (_, items) = api.get("/api/bucket-items", &alice).await;
    let order: Vec<&str> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["c", "a", "b"]);

    let (status, _) = api
        .post(
            "/api/bucket-items/reorder",
            Some(&alice),
            json!({ "items": [
                { "id": id(&a), "priority": 9 },
                { "id": id(&foreign), "priority": 0 },
            ]}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, a_now) = api.get(&format!("/api/bucket-items/{}", id(&a)), &alice).await;
    assert_eq!(a_now["priority"], 1, "batch must roll back");
    let (_, foreign_now) = api
        .get(&format!("/api/bucket-items/{}", id(&foreign)), &bob)
        .await;
    assert_eq!(foreign_now["priority"], 1);

    let (status, body) = api
        .post("/api/bucket-items/reorder", Some(&alice), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Items array is required" }));
}

#[tokio::test]
async fn archive_transition_across_new_year() {
    let shared = pool();
    let last_year = Api::start(state_at(&shared, 2025, 6, 1)).await;
    let this_year = Api::start(state_at(&shared, 2026, 1, 5)).await;

    let old_token = last_year.signup("archive@example.com").await;
    let finished = last_year.create(&old_token, "Climb Snowdon", "upcoming_year").await;
    let unfinished = last_year.create(&old_token, "Read 30 books", "upcoming_year").await;
    let someday = last_year.create(&old_token, "See the aurora", "general").await;

    for item in [&finished, &someday] {
        let (status, _) = last_year
            .patch(
                &format!("/api/bucket-items/{}", id(item)),
                &old_token,
                json!({ "completed": true }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, _) = this_year.get("/api/bucket-items", &old_token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED, "30-day token has expired");

    let token = this_year.login("archive@example.com").await;
    let (status, body) = this_year
        .post("/api/bucket-items/archive/previous-year", Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Previous year items archived successfully");
    assert_eq!(body["archivedCount"], 1);
    assert_eq!(body["refreshedCount"], 1);

    let (_, archived) = this_year.get("/api/bucket-items/archive/all", &token).await;
    let archived = archived.as_array().unwrap();
    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0]["id"], finished["id"]);
    assert_eq!(archived[0]["archived_year"], 2025);

    let (_, by_year) = this_year.get("/api/bucket-items/archive/2025", &token).await;
    assert_eq!(by_year.as_array().unwrap().len(), 1);
    let (_, empty) = this_year.get("/api/bucket-items/archive/2024", &token).await;
    assert_eq!(empty, json!([]));

    let (_, active) = this_year.get("/api/bucket-items", &token).await;
    let active = active.as_array().unwrap();
    assert_eq!(active.len(), 2, "archived items leave the active list");
    let carried = active.iter().find(|i| i["id"] == unfinished["id"]).unwrap();
    assert_eq!(carried["goal_year"], 2026);
    let general = active.iter().find(|i| i["id"] == someday["id"]).unwrap();
    assert_eq!(general["archived"], false);

    let (_, again) = this_year
        .post("/api/bucket-items/archive/previous-year", Some(&token), json!({}))
        .await;
    assert_eq!(again["archivedCount"], 0);
    assert_eq!(again["refreshedCount"], 0);
}

#[tokio::test]
async fn api_key_gate_when_configured() {
    let api = Api::start(state_at(&pool(), 2026, 4, 1).with_api_key("letmein")).await;
    let token = api.signup("keyed@example.com").await;

    let (status, body) = api.get("/api/bucket-items", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Invalid or missing API key" }));

    let response = api
        .client
        .get(api.url("/api/bucket-items"))
        .bearer_auth(&token)
        .header("X-API-Key", "letmein")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let api = Api::start(state_at(&pool(), 2026, 4, 1)).await;
    let response = api.client.get(api.url("/nothing/here")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Route not found" }));
}
