use axum::response::Html;

pub async fn login_page() -> Html<&'static str> {
    Html(include_str!("../../assets/login.html"))
}

pub async fn dashboard_page() -> Html<&'static str> {
    Html(include_str!("../../assets/dashboard.html"))
}

pub async fn admin_secret_page() -> Html<&'static str> {
    Html(include_str!("../../assets/admin-secret.html"))
}
