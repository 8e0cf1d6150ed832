use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::auth::guard_pages;
use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{admin, auth, events, health_check, pages, system};
use crate::state::AppState;

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/verify", get(auth::verify))
        .route(
            "/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/events/:id/invite", get(events::event_invite))
        .route(
            "/admin-secret/users",
            get(admin::list_users).post(admin::create_user),
        )
        .route("/admin-secret/users/:id", delete(admin::delete_user))
        .route("/admin-secret/reset-admin", post(admin::reset_admin))
        .route("/init", get(system::init))
        .route("/health/db", get(system::database_health))
}

fn page_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(pages::login_page))
        .route("/login", get(pages::login_page))
        .route("/dashboard", get(pages::dashboard_page))
        .route("/admin-secret", get(pages::admin_secret_page))
        .route_layer(middleware::from_fn_with_state(state, guard_pages))
}

pub fn create_routes(state: Arc<AppState>) -> Router {
    let security = create_security_headers_layer(state.config.production);
    let cors = create_cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .merge(page_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(security)
        .layer(cors)
        .with_state(state)
}
