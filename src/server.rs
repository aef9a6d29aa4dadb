//! HTTP surface serving the rendered dashboard.
//!
//! Every `GET /` is a fresh page load: the document is fetched again, and the `status` and
//! `q` query parameters become the filter control values.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::dashboard::Dashboard;
use crate::page::{Control, Page};

#[derive(Debug, Clone)]
pub struct AppState {
    dashboard: Arc<Dashboard>,
    title: Arc<str>,
}

/// Filter control values carried in the query string.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub status: Option<String>,
    pub q: Option<String>,
}

impl FilterParams {
    /// Collect the filter values from raw query pairs. A repeated key keeps its last value,
    /// the way a form control holds only one value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "status" => params.status = Some(value),
                "q" => params.q = Some(value),
                _ => {}
            }
        }
        params
    }
}

pub fn create_router(dashboard: Dashboard, title: impl Into<String>) -> Router {
    let state = AppState {
        dashboard: Arc::new(dashboard),
        title: Arc::from(title.into()),
    };

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

async fn index(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let params = FilterParams::from_pairs(pairs);
    let mut page = Page::new(state.title.as_ref());
    if let Some(status) = params.status {
        page.status_filter = Some(Control::new(status));
    }
    if let Some(q) = params.q {
        page.query = Some(Control::new(q));
    }

    state.dashboard.start(&mut page).await;

    ([(header::CACHE_CONTROL, "no-store")], Html(page.to_html()))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn repeated_keys_keep_the_last_value() {
        let params = FilterParams::from_pairs(pairs(&[
            ("status", "done"),
            ("q", "a"),
            ("status", "todo"),
            ("q", "b"),
        ]));
        assert_eq!(params.status.as_deref(), Some("todo"));
        assert_eq!(params.q.as_deref(), Some("b"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let params = FilterParams::from_pairs(pairs(&[("page", "2")]));
        assert_eq!(params, FilterParams::default());
    }
}
