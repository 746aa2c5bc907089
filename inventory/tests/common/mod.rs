use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use once_cell::sync::Lazy;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::{json, Value};

use inventory::config::Config;
use inventory::server::serve;

static CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

pub fn random_string(prefix: &str, length: usize) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect();
    format!("{}_{}", prefix, suffix)
}

pub fn test_config(catalog: SocketAddr, account: SocketAddr, location: SocketAddr) -> Config {
    Config {
        address: "127.0.0.1:0".parse().unwrap(),
        catalog_url: format!("http://{catalog}"),
        account_url: format!("http://{account}"),
        location_url: format!("http://{location}"),
        upstream_timeout_secs: 5,
        ban_lookup_concurrency: 10,
        valid_attribute_list: "bandwidth,ipAddress".to_string(),
        product_offering_name: "Internet".to_string(),
        max_page_size: 100,
        export_prometheus: false,
    }
}

pub struct ServerHandle {
    pub addr: SocketAddr,
}

impl ServerHandle {
    pub async fn for_config(config: Config) -> ServerHandle {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let addr = listener.local_addr().expect("listener has a local address");

        tokio::spawn(serve(config, listener, std::future::pending()));

        ServerHandle { addr }
    }

    pub async fn send_inventory_request(&self, query: &str) -> reqwest::Response {
        CLIENT
            .get(format!("http://{}/v1/inventory?{}", self.addr, query))
            .send()
            .await
            .expect("failed to send inventory request")
    }
}

async fn spawn_upstream(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind upstream listener");
    let addr = listener.local_addr().expect("listener has a local address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("upstream server failed");
    });

    addr
}

/// Catalog upstream returning a fixed body for every query.
pub async fn catalog_upstream(body: String) -> SocketAddr {
    let app = Router::new().route(
        "/inventory/internet",
        get(move || {
            let body = body.clone();
            async move { body }
        }),
    );
    spawn_upstream(app).await
}

/// Account upstream resolving BANs from the x-customer-number header.
/// Unknown BANs get an empty account list, which is not an error.
pub async fn account_upstream(accounts: HashMap<String, (String, String)>) -> SocketAddr {
    let accounts = Arc::new(accounts);
    let app = Router::new().route(
        "/billing-accounts",
        get(move |headers: HeaderMap| {
            let accounts = accounts.clone();
            async move {
                let ban = headers
                    .get("x-customer-number")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("");

                let body = match accounts.get(ban) {
                    Some((invoice_display_number, customer_number)) => json!({
                        "billingAccounts": [{"id": invoice_display_number}],
                        "customerNumber": customer_number,
                    }),
                    None => json!({"billingAccounts": []}),
                };
                Json(body)
            }
        }),
    );
    spawn_upstream(app).await
}

pub async fn location_upstream(sites: Vec<Value>) -> SocketAddr {
    let app = Router::new().route(
        "/locations",
        post(move || {
            let sites = sites.clone();
            async move { Json(Value::Array(sites)) }
        }),
    );
    spawn_upstream(app).await
}

/// An upstream that serves 500s on every route.
pub async fn broken_upstream() -> SocketAddr {
    async fn fail() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    let app = Router::new()
        .route("/inventory/internet", get(fail))
        .route("/billing-accounts", get(fail))
        .route("/locations", post(fail));
    spawn_upstream(app).await
}
