//! Landing page.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../resources/index.html");

/// `GET /`: static page with forms for every portal action.
pub async fn page() -> Html<&'static str> {
    Html(INDEX_HTML)
}
