use std::time::Duration;

use async_trait::async_trait;

use crate::api::InventoryError;

/// Pagination hints forwarded to the catalog query.
#[derive(Debug, Clone, Copy)]
pub struct CatalogPage {
    pub page_number: u32,
    pub page_size: u32,
    pub max_page_size: u32,
}

impl Default for CatalogPage {
    fn default() -> CatalogPage {
        CatalogPage {
            page_number: 1,
            page_size: 20,
            max_page_size: 100,
        }
    }
}

/// System of record for products. A failed call or unusable body is fatal
/// for the whole request, unlike the other upstreams.
#[async_trait]
pub trait CatalogClient {
    /// Fetch the raw inventory body for a comma-joined set of customer numbers.
    async fn internet_inventory(
        &self,
        customer_numbers: &str,
        page: CatalogPage,
    ) -> Result<String, InventoryError>;
}

pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<HttpCatalogClient> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Product Inventory Service")
            .build()?;

        Ok(HttpCatalogClient { client, base_url })
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn internet_inventory(
        &self,
        customer_numbers: &str,
        page: CatalogPage,
    ) -> Result<String, InventoryError> {
        let url = format!("{}/inventory/internet", self.base_url);

        let response = self
            .client
            .get(url)
            .query(&[("customerNumbers", customer_numbers)])
            .query(&[
                ("pageNumber", page.page_number),
                ("pageSize", page.page_size),
                ("maxPageSize", page.max_page_size),
            ])
            .send()
            .await
            .map_err(|e| InventoryError::CatalogUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| InventoryError::CatalogUnavailable(e.to_string()))?;

        response
            .text()
            .await
            .map_err(|e| InventoryError::CatalogUnavailable(e.to_string()))
    }
}

#[derive(Clone, Default)]
pub struct MockCatalogClient {
    body: Option<String>,
}

impl MockCatalogClient {
    pub fn returning(body: &str) -> MockCatalogClient {
        MockCatalogClient {
            body: Some(body.to_string()),
        }
    }

    pub fn unavailable() -> MockCatalogClient {
        MockCatalogClient { body: None }
    }
}

#[async_trait]
impl CatalogClient for MockCatalogClient {
    async fn internet_inventory(
        &self,
        _customer_numbers: &str,
        _page: CatalogPage,
    ) -> Result<String, InventoryError> {
        match &self.body {
            Some(body) => Ok(body.clone()),
            None => Err(InventoryError::CatalogUnavailable(
                "mock catalog is down".to_string(),
            )),
        }
    }
}
