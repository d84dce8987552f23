use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use bson::{Bson, Document};
use serde_json::{Value, json};
use tavola::{config::Config, router, state::AppState};
use tavola_core::{
    backend::StoreBackend,
    error::{StoreError, StoreResult},
    store::StoreGateway,
};
use tavola_memory::InMemoryStore;
use tower::ServiceExt;

const OUTAGE: &str = "connection refused: no reachable servers in the replica set after 30s";

#[derive(Debug)]
struct UnreachableStore;

#[async_trait]
impl StoreBackend for UnreachableStore {
    async fn insert_document(&self, _document: Document, _collection: &str) -> StoreResult<Bson> {
        Err(StoreError::Backend(OUTAGE.to_string()))
    }

    async fn find_documents(&self, _collection: &str) -> StoreResult<Vec<Document>> {
        Err(StoreError::Backend(OUTAGE.to_string()))
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        Err(StoreError::Backend(OUTAGE.to_string()))
    }
}

fn database_config() -> Config {
    Config {
        database_url: Some("memory://".to_string()),
        database_name: Some("restaurant".to_string()),
        ..Config::default()
    }
}

fn memory_app() -> (Router, InMemoryStore) {
    let backend = InMemoryStore::new();
    let state = AppState::new(database_config(), Some(StoreGateway::new(backend.clone())));

    (router(state), backend)
}

fn unreachable_app() -> Router {
    router(AppState::new(database_config(), Some(StoreGateway::new(UnreachableStore))))
}

fn storeless_app() -> Router {
    router(AppState::new(Config::default(), None))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}

fn reservation(guests: i64) -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "phone": "555-0100",
        "date": "2025-06-01",
        "time": "19:30",
        "guests": guests,
        "notes": "Anniversary",
    })
}

fn error_fields(body: &Value) -> Vec<String> {
    body["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|error| error["loc"][1].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn greetings() {
    let app = storeless_app();

    assert_eq!(
        send(&app, get("/")).await,
        (StatusCode::OK, json!({ "message": "Hello from FastAPI Backend!" }))
    );
    assert_eq!(
        send(&app, get("/api/hello")).await,
        (StatusCode::OK, json!({ "message": "Hello from the backend API!" }))
    );
}

#[tokio::test]
async fn menu_is_seeded_once() {
    let (app, backend) = memory_app();

    let (status, first) = send(&app, get("/api/menu")).await;
    assert_eq!(status, StatusCode::OK);

    let items = first.as_array().unwrap();
    let summary: Vec<(&str, f64, &str)> = items
        .iter()
        .map(|item| {
            (
                item["name"].as_str().unwrap(),
                item["price"].as_f64().unwrap(),
                item["category"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Margherita Pizza", 12.0, "Mains"),
            ("Spicy Arrabbiata Pasta", 14.0, "Mains"),
            ("Caesar Salad", 9.5, "Starters"),
            ("Tiramisu", 8.0, "Desserts"),
            ("Lemonade", 4.0, "Drinks"),
        ]
    );

    for item in items {
        assert_eq!(item["id"].as_str().unwrap().len(), 24);
        assert!(item.get("_id").is_none());
        assert!(item["created_at"].as_str().unwrap().ends_with('Z'));
    }
    assert_eq!(items[1]["is_spicy"], json!(true));
    assert_eq!(items[2]["is_vegetarian"], json!(false));

    let (status, second) = send(&app, get("/api/menu")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, first);
    assert_eq!(backend.find_documents("menuitem").await.unwrap().len(), 5);
}

#[tokio::test]
async fn menu_reports_storage_failures() {
    let (status, body) = send(&unreachable_app(), get("/api/menu")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "detail": format!("Backend error: {OUTAGE}") }));
}

#[tokio::test]
async fn menu_without_database_is_a_server_error() {
    let (status, body) = send(&storeless_app(), get("/api/menu")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("DATABASE_URL"));
}

#[tokio::test]
async fn valid_reservations_are_stored() {
    let (app, backend) = memory_app();

    for guests in [1, 20] {
        let (status, body) = send(&app, post_json("/api/reservations", reservation(guests))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(!body["id"].as_str().unwrap().is_empty());
    }

    let stored = backend.find_documents("reservation").await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].get_str("phone").unwrap(), "555-0100");
    assert_eq!(stored[1].get_i32("guests").unwrap(), 20);
}

#[tokio::test]
async fn reservation_optionals_may_be_omitted() {
    let (app, backend) = memory_app();

    let (status, _) = send(
        &app,
        post_json(
            "/api/reservations",
            json!({
                "name": "Ada",
                "phone": "555-0100",
                "date": "2025-06-01",
                "time": "19:30",
                "guests": 2,
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let stored = backend.find_documents("reservation").await.unwrap();
    assert_eq!(stored[0].get("notes"), Some(&Bson::Null));
}

#[tokio::test]
async fn guest_count_out_of_range_is_rejected() {
    let (app, backend) = memory_app();

    for guests in [0, 21] {
        let (status, body) = send(&app, post_json("/api/reservations", reservation(guests))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_fields(&body), vec!["guests"]);
    }

    assert!(backend.find_documents("reservation").await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_reservation_fields_are_rejected() {
    let (app, _) = memory_app();
    let mut body = reservation(4);
    body["name"] = json!("");
    body["time"] = Value::Null;

    let (status, body) = send(&app, post_json("/api/reservations", body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&body), vec!["name", "time"]);
    assert_eq!(body["detail"][0]["type"], "string_too_short");
    assert_eq!(body["detail"][1]["type"], "missing");
}

#[tokio::test]
async fn malformed_bodies_are_rejected() {
    let (app, _) = memory_app();

    let (status, body) = send(&app, post_json("/api/reservations", json!("a table for two"))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body"]));
    assert_eq!(body["detail"][0]["type"], "type_error");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "json_invalid");
}

#[tokio::test]
async fn wrongly_typed_fields_are_reported_per_field() {
    let (app, backend) = memory_app();
    let mut body = reservation(4);
    body["guests"] = json!("many");
    body["phone"] = json!(5550100);

    let (status, body) = send(&app, post_json("/api/reservations", body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&body), vec!["phone", "guests"]);
    assert_eq!(body["detail"][0]["type"], "string_type");
    assert_eq!(body["detail"][1]["loc"], json!(["body", "guests"]));
    assert_eq!(body["detail"][1]["type"], "int_parsing");
    assert!(backend.find_documents("reservation").await.unwrap().is_empty());
}

#[tokio::test]
async fn integral_float_guest_count_is_accepted() {
    let (app, backend) = memory_app();
    let mut body = reservation(4);
    body["guests"] = json!(4.0);
    body["name"] = json!(" ");

    let (status, _) = send(&app, post_json("/api/reservations", body)).await;

    assert_eq!(status, StatusCode::OK);
    let stored = backend.find_documents("reservation").await.unwrap();
    assert_eq!(stored[0].get_i32("guests").unwrap(), 4);
    assert_eq!(stored[0].get_str("name").unwrap(), " ");
}

#[tokio::test]
async fn validation_runs_before_storage() {
    let app = unreachable_app();
    let (status, _) = send(&app, post_json("/api/reservations", reservation(0))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn reservation_storage_failure_is_a_server_error() {
    let app = unreachable_app();
    let (status, body) = send(&app, post_json("/api/reservations", reservation(2))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], format!("Backend error: {OUTAGE}"));
}

#[tokio::test]
async fn contact_requires_email() {
    let (app, _) = memory_app();

    let (status, body) = send(
        &app,
        post_json("/api/contact", json!({ "name": "Grace", "message": "Lovely dinner" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&body), vec!["email"]);
    assert_eq!(body["detail"][0]["msg"], "Field required");
}

#[tokio::test]
async fn contact_messages_are_stored() {
    let (app, backend) = memory_app();

    let (status, body) = send(
        &app,
        post_json(
            "/api/contact",
            json!({ "name": "Grace", "email": "grace@example.com", "message": "Lovely dinner" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let stored = backend.find_documents("contactmessage").await.unwrap();
    let id = body["id"].as_str().unwrap();
    assert_eq!(stored[0].get_object_id("_id").unwrap().to_hex(), id);
}

#[tokio::test]
async fn diagnostics_list_collections() {
    let (app, _) = memory_app();
    send(&app, get("/api/menu")).await;

    let (status, body) = send(&app, get("/test")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "backend": "✅ Running",
            "database": "✅ Connected & Working",
            "database_url": "✅ Set",
            "database_name": "✅ Set",
            "connection_status": "Connected",
            "collections": ["menuitem"],
        })
    );
}

#[tokio::test]
async fn diagnostics_cap_collection_list() {
    let backend = InMemoryStore::new();
    for n in 0..12 {
        backend
            .insert_document(Document::new(), &format!("collection{n:02}"))
            .await
            .unwrap();
    }
    let app = router(AppState::new(database_config(), Some(StoreGateway::new(backend))));

    let (_, body) = send(&app, get("/test")).await;

    assert_eq!(body["collections"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn diagnostics_never_fail() {
    let (status, body) = send(&unreachable_app(), get("/test")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["connection_status"], "Connected");

    let database = body["database"].as_str().unwrap();
    let detail = database
        .strip_prefix("⚠️  Connected but Error: ")
        .unwrap();
    assert_eq!(detail.chars().count(), 50);
    assert!(OUTAGE.starts_with(&detail["Backend error: ".len()..]));

    let (status, body) = send(&storeless_app(), get("/test")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "⚠️  Available but not initialized");
    assert_eq!(body["database_url"], "❌ Not Set");
    assert_eq!(body["database_name"], "❌ Not Set");
}

#[tokio::test]
async fn cors_allows_any_origin_with_credentials() {
    let (app, _) = memory_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/reservations")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let headers = response.headers();

    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://example.com");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
}
