use axum::response::Html;

use crate::templates::welcome_page;

pub async fn index_handler() -> Html<String> {
    Html(welcome_page().into_string())
}
