use booking_core::{
    api::router::create_router, config::Config, infra::factory::build_state, state::AppState,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
            default_open_start: "09:00".to_string(),
            default_open_end: "17:00".to_string(),
        };

        let state = Arc::new(build_state(&config, pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> axum::response::Response {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        let request = match body {
            Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Creates a tenant plus one customer and returns (tenant_id, customer_id).
#[allow(dead_code)]
pub async fn seed_tenant(app: &TestApp, slug: &str) -> (String, String) {
    let res = app
        .request(
            Method::POST,
            "/api/v1/tenants",
            Some(serde_json::json!({ "name": "Test Tenant", "slug": slug })),
        )
        .await;
    assert!(res.status().is_success(), "tenant create failed");
    let tenant = parse_body(res).await;
    let tenant_id = tenant["id"].as_str().unwrap().to_string();

    let res = app
        .request(
            Method::POST,
            &format!("/api/v1/{}/customers", tenant_id),
            Some(serde_json::json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com"
            })),
        )
        .await;
    assert!(res.status().is_success(), "customer create failed");
    let customer = parse_body(res).await;
    let customer_id = customer["id"].as_str().unwrap().to_string();

    (tenant_id, customer_id)
}
