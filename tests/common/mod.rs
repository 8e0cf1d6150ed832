use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use scout_events_server::config::Config;
use scout_events_server::db::Database;
use scout_events_server::routes::create_routes;
use scout_events_server::AppState;

pub const ADMIN_SECRET: &str = "painel-secreto";
pub const ADMIN_EMAIL: &str = "admin@escoteiros.com";
pub const ADMIN_PASSWORD: &str = "admin123";

pub struct TestContext {
    pub state: Arc<AppState>,
    pub app: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl TestContext {
    /// Connects to `TEST_DATABASE_URL` and wipes both tables. Returns `None`
    /// when no database is configured so the suite can be skipped.
    pub async fn new() -> Option<TestContext> {
        let url = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => {
                println!("[~] TEST_DATABASE_URL not set, skipping database flow");
                return None;
            }
        };

        let config = Config::from_lookup(|key| match key {
            "ADMIN_SECRET_PASSWORD" => Some(ADMIN_SECRET.to_string()),
            "JWT_SECRET" => Some("integration-secret".to_string()),
            "DATABASE_URL" => Some(url.clone()),
            _ => None,
        })
        .expect("Failed to build test config");

        let db = Database::connect(&config.database_url, 2, config.seed_options())
            .await
            .expect("Failed to connect to test database");

        // Create the schema, then start from an empty slate with only the
        // default admin present.
        db.ready().await.expect("Failed to initialize schema");
        sqlx::query("TRUNCATE events, users RESTART IDENTITY")
            .execute(db.pool())
            .await
            .expect("Failed to truncate tables");
        let hash = scout_events_server::auth::hash_password(ADMIN_PASSWORD).unwrap();
        scout_events_server::db::users::insert(db.pool(), "Administrador", ADMIN_EMAIL, &hash)
            .await
            .expect("Failed to seed admin");

        let state = Arc::new(AppState::new(config, db));
        let app = create_routes(state.clone());
        Some(TestContext { state, app })
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.dispatch(builder.body(body).unwrap()).await
    }

    /// Bodiless request carrying one extra header.
    pub async fn request_with_header(
        &self,
        method: Method,
        uri: &str,
        (name, value): (&str, &str),
    ) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(name, value)
            .body(Body::empty())
            .unwrap();
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            set_cookie,
            body,
        }
    }

    /// Logs in as the seeded admin and returns the `Cookie` header value.
    pub async fn login(&self) -> String {
        let response = self
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);

        let set_cookie = response.set_cookie.expect("login must set a cookie");
        set_cookie
            .split(';')
            .next()
            .expect("cookie pair")
            .to_string()
    }
}
