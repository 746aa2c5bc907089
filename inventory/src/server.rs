use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::clients::account::HttpAccountClient;
use crate::clients::catalog::{CatalogPage, HttpCatalogClient};
use crate::clients::location::HttpLocationClient;
use crate::config::Config;
use crate::enrichment::AccountEnricher;
use crate::internet::InternetInventory;
use crate::location::LocationEnricher;
use crate::router;

pub async fn serve<F>(config: Config, listener: TcpListener, shutdown: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let timeout = Duration::from_secs(config.upstream_timeout_secs);

    let catalog = Arc::new(
        HttpCatalogClient::new(config.catalog_url.clone(), timeout)
            .expect("failed to create catalog client"),
    );
    let accounts = Arc::new(
        HttpAccountClient::new(config.account_url.clone(), timeout)
            .expect("failed to create account client"),
    );
    let locations = Arc::new(
        HttpLocationClient::new(config.location_url.clone(), timeout)
            .expect("failed to create location client"),
    );

    let internet = InternetInventory::new(
        catalog,
        AccountEnricher::new(accounts, config.ban_lookup_concurrency),
        LocationEnricher::new(locations),
        config.valid_attributes(),
        config.product_offering_name.clone(),
        CatalogPage {
            max_page_size: config.max_page_size,
            ..Default::default()
        },
    );

    let app = router::router(internet, config.export_prometheus);

    tracing::info!(
        "listening on {:?}",
        listener.local_addr().expect("listener has a local address")
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .expect("server failed");
}
