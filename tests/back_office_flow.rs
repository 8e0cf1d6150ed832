mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Local, NaiveTime};
use serde_json::json;

use common::{TestContext, ADMIN_EMAIL, ADMIN_SECRET};
use scout_events_server::db::events;
use scout_events_server::models::{EventDraft, EventStatus};

fn draft(title: &str, days_from_today: i64, status: EventStatus) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        description: None,
        event_date: Local::now().date_naive() + Duration::days(days_from_today),
        event_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        image_url: None,
        location: "Sede".to_string(),
        status,
    }
}

// A single test drives the whole flow: the suite shares one database and
// the admin-count checks depend on ordering.
#[tokio::test]
async fn test_back_office_flow() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    println!("[+] Login and session checks");
    let response = ctx
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": ADMIN_EMAIL, "password": "wrong" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = ctx
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "ninguem@escoteiros.com", "password": "x" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let cookie = ctx.login().await;
    let response = ctx
        .request(Method::GET, "/api/auth/verify", Some(&cookie), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["authenticated"], true);

    println!("[+] Event creation");
    let response = ctx
        .request(
            Method::POST,
            "/api/events",
            Some(&cookie),
            Some(json!({
                "title": "  Reunião Semanal  ",
                "description": "Reunião do grupo",
                "event_date": (Local::now().date_naive() + Duration::days(3)).format("%Y-%m-%d").to_string(),
                "event_time": "19:00",
                "location": "Sede",
                "status": "cancelado"
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["title"], "Reunião Semanal");
    // New events always start scheduled.
    assert_eq!(response.body["data"]["status"], "andamento");
    let upcoming_id = response.body["data"]["id"].as_i64().unwrap();

    let response = ctx
        .request(
            Method::POST,
            "/api/events",
            Some(&cookie),
            Some(json!({
                "title": "Acampamento",
                "event_date": "2000-01-15",
                "event_time": "09:00",
                "location": "Sede"
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let past_id = response.body["data"]["id"].as_i64().unwrap();

    println!("[+] Status auto-transition");
    let pool = ctx.state.db.pool();
    let yesterday = events::insert(pool, &draft("Ontem", -1, EventStatus::Andamento))
        .await
        .unwrap();
    let today = events::insert(pool, &draft("Hoje", 0, EventStatus::Andamento))
        .await
        .unwrap();
    let cancelled = events::insert(pool, &draft("Cancelado", -10, EventStatus::Cancelado))
        .await
        .unwrap();

    let response = ctx.request(Method::GET, "/api/events", None, None).await;
    assert_eq!(response.status, StatusCode::OK);

    let status_of = |id: i64| {
        let path = format!("/api/events/{id}");
        let ctx = &ctx;
        async move {
            ctx.request(Method::GET, &path, None, None).await.body["data"]["status"]
                .as_str()
                .unwrap()
                .to_string()
        }
    };
    assert_eq!(status_of(past_id).await, "realizado");
    assert_eq!(status_of(yesterday.id as i64).await, "realizado");
    assert_eq!(status_of(today.id as i64).await, "andamento");
    assert_eq!(status_of(cancelled.id as i64).await, "cancelado");
    assert_eq!(status_of(upcoming_id).await, "andamento");

    println!("[+] Filtering and pagination");
    for day in 1..=6 {
        events::insert(pool, &draft("Extra", 30 + day, EventStatus::Andamento))
            .await
            .unwrap();
    }
    // 5 events so far plus 6 extras.
    let response = ctx
        .request(Method::GET, "/api/events?limit=4&page=1", None, None)
        .await;
    let pagination = &response.body["data"]["pagination"];
    assert_eq!(pagination["total"], 11);
    assert_eq!(pagination["totalPages"], 3);
    assert_eq!(response.body["data"]["events"].as_array().unwrap().len(), 4);

    let response = ctx
        .request(Method::GET, "/api/events?limit=4&page=3", None, None)
        .await;
    assert_eq!(response.body["data"]["events"].as_array().unwrap().len(), 3);

    let response = ctx
        .request(Method::GET, "/api/events?limit=4&page=9", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["events"].as_array().unwrap().is_empty());

    let response = ctx
        .request(Method::GET, "/api/events?status=realizado", None, None)
        .await;
    assert_eq!(response.body["data"]["pagination"]["total"], 2);

    let response = ctx
        .request(Method::GET, "/api/events?page=x&limit=", None, None)
        .await;
    assert_eq!(response.body["data"]["pagination"]["page"], 1);
    assert_eq!(response.body["data"]["pagination"]["limit"], 8);

    println!("[+] Update, invite and delete");
    let response = ctx
        .request(
            Method::PUT,
            &format!("/api/events/{upcoming_id}"),
            Some(&cookie),
            Some(json!({
                "title": "Reunião Extra",
                "event_date": "2030-05-10",
                "event_time": "20:30",
                "location": "Parque",
                "status": "cancelado"
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "cancelado");
    assert_eq!(response.body["data"]["event_time"], "20:30:00");

    let response = ctx
        .request(
            Method::PUT,
            "/api/events/999999",
            Some(&cookie),
            Some(json!({
                "title": "Fantasma",
                "event_date": "2030-05-10",
                "event_time": "20:30",
                "location": "Parque"
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = ctx
        .request(
            Method::GET,
            &format!("/api/events/{upcoming_id}/invite?style=simple"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let text = response.body["data"]["invite"].as_str().unwrap();
    assert!(text.contains("Reunião Extra"));
    assert!(text.contains("10/05/2030 às 20:30"));

    let uri = format!("/api/events/{upcoming_id}");
    let response = ctx.request(Method::DELETE, &uri, Some(&cookie), None).await;
    assert_eq!(response.status, StatusCode::OK);
    let response = ctx.request(Method::DELETE, &uri, Some(&cookie), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    println!("[+] Admin panel");
    let list = ctx
        .request(Method::GET, "/api/admin-secret/users", None, None)
        .await;
    assert_eq!(list.status, StatusCode::FORBIDDEN);

    let create = |email: &'static str| {
        let ctx = &ctx;
        async move {
            ctx.request(
                Method::POST,
                "/api/admin-secret/users",
                None,
                Some(json!({
                    "secretPassword": ADMIN_SECRET,
                    "name": "Chefe",
                    "email": email,
                    "password": "segredo"
                })),
            )
            .await
        }
    };

    let duplicate = create(ADMIN_EMAIL).await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.body["error"]["message"], "Email já está em uso");

    let created = create("chefe@escoteiros.com").await;
    assert_eq!(created.status, StatusCode::OK);
    let chefe_id = created.body["data"]["id"].as_i64().unwrap();
    assert!(created.body["data"].get("password").is_none());

    let delete_user = |id: i64| {
        let ctx = &ctx;
        async move {
            ctx.request(
                Method::DELETE,
                &format!("/api/admin-secret/users/{id}"),
                None,
                Some(json!({ "secretPassword": ADMIN_SECRET })),
            )
            .await
        }
    };

    assert_eq!(delete_user(999_999).await.status, StatusCode::NOT_FOUND);
    assert_eq!(delete_user(chefe_id).await.status, StatusCode::OK);

    // Only the seeded admin (id 1) is left.
    let last = delete_user(1).await;
    assert_eq!(last.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        last.body["error"]["message"],
        "Não é possível deletar o último usuário administrador"
    );

    println!("[+] Admin reset and logout");
    let response = ctx
        .request(
            Method::POST,
            "/api/admin-secret/reset-admin",
            None,
            Some(json!({ "secretPassword": ADMIN_SECRET })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], ADMIN_EMAIL);
    let cookie = ctx.login().await;

    // The reset updates the existing row in place rather than re-creating it.
    let listed = ctx
        .request_with_header(
            Method::GET,
            "/api/admin-secret/users",
            ("x-admin-secret", ADMIN_SECRET),
        )
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let users = listed.body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], 1);

    let response = ctx
        .request(Method::POST, "/api/auth/logout", Some(&cookie), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.set_cookie.unwrap().contains("Max-Age=0"));

    let response = ctx.request(Method::GET, "/api/health/db", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["usersCount"], 1);
}
