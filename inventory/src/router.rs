use std::future::ready;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::internet::InternetInventory;
use crate::metrics::{setup_metrics_recorder, track_metrics};
use crate::query;

#[derive(Clone)]
pub struct AppState {
    pub internet: Arc<InternetInventory>,
}

async fn index() -> &'static str {
    "product inventory"
}

pub fn router(internet: InternetInventory, metrics: bool) -> Router {
    let state = AppState {
        internet: Arc::new(internet),
    };

    let router = Router::new()
        .route("/", get(index))
        .route("/v1/inventory", get(query::get_customer_inventory))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(track_metrics))
        .with_state(state);

    // Don't install metrics unless asked to
    // Installing a global recorder when the crate is used as a library (during tests etc)
    // does not work well.
    if metrics {
        let recorder_handle = setup_metrics_recorder();

        router.route("/metrics", get(move || ready(recorder_handle.render())))
    } else {
        router
    }
}
