#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]

use std::fs;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use hmac::{Hmac, Mac};
use http_body_util::BodyExt;
use inbox::{
    app,
    config::InboxConfig,
    state::AppState,
    store::{self, Endpoint},
    types::ProviderKind,
};
use sha2::Sha256;
use sqlx::{
    Connection, SqliteConnection, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tempfile::NamedTempFile;
use tower::ServiceExt;

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    _db_file: NamedTempFile,
}

impl TestApp {
    pub fn pool(&self) -> &SqlitePool {
        &self.state.pool
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn endpoint(&self, provider: ProviderKind, secret: &str) -> Endpoint {
        store::create_endpoint(self.pool(), provider, secret)
            .await
            .expect("create endpoint")
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.pool())
            .await
            .expect("count rows")
    }
}

pub async fn setup() -> TestApp {
    setup_with(InboxConfig::default()).await
}

pub async fn setup_with(config: InboxConfig) -> TestApp {
    let db_file = NamedTempFile::new().expect("create temp sqlite file");
    let options = SqliteConnectOptions::new()
        .filename(db_file.path())
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_millis(500));

    let mut conn = SqliteConnection::connect_with(&options)
        .await
        .expect("connect sqlite for migrations");
    run_migrations_on_conn(&mut conn)
        .await
        .expect("run migrations");
    conn.close().await.expect("close migration conn");

    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await
        .expect("connect pool");

    let state = AppState::new(pool, config).expect("build app state");
    let router = app::router(state.clone());

    TestApp {
        state,
        router,
        _db_file: db_file,
    }
}

async fn run_migrations_on_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    let mut entries: Vec<_> = fs::read_dir("migrations")
        .map_err(sqlx::Error::Io)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().and_then(|ext| ext.to_str()) == Some("sql"))
        .collect();

    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let contents = fs::read_to_string(entry.path()).map_err(sqlx::Error::Io)?;
        for statement in contents.split(';') {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            sqlx::query(statement).execute(&mut *conn).await?;
        }
    }

    Ok(())
}

pub async fn response_body(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn response_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&response_body(response).await).expect("response is JSON")
}

pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn github_signature(secret: &str, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

pub fn stripe_signature(secret: &str, timestamp: i64, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{timestamp}.").as_bytes());
    mac.update(body);
    format!("t={timestamp},v1={}", hex::encode(mac.finalize().into_bytes()))
}

pub fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status");
}
