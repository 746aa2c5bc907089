use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::SiteLocation;

/// Batched site lookup: one call for the whole distinct id set, never a
/// per-id fan-out. Absent ids in the response are not an error.
#[async_trait]
pub trait LocationClient {
    async fn site_locations(&self, site_ids: &[String]) -> Result<Vec<SiteLocation>>;
}

pub struct HttpLocationClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLocationClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<HttpLocationClient> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Product Inventory Service")
            .build()?;

        Ok(HttpLocationClient { client, base_url })
    }
}

#[async_trait]
impl LocationClient for HttpLocationClient {
    async fn site_locations(&self, site_ids: &[String]) -> Result<Vec<SiteLocation>> {
        let url = format!("{}/locations", self.base_url);

        let response = self
            .client
            .post(url)
            .json(&site_ids)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Vec<SiteLocation>>().await?)
    }
}

#[derive(Clone, Default)]
pub struct MockLocationClient {
    locations: Vec<SiteLocation>,
    fail_all: bool,
    calls: Arc<AtomicUsize>,
}

impl MockLocationClient {
    pub fn returning(locations: Vec<SiteLocation>) -> MockLocationClient {
        MockLocationClient {
            locations,
            ..Default::default()
        }
    }

    pub fn failing() -> MockLocationClient {
        MockLocationClient {
            fail_all: true,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationClient for MockLocationClient {
    async fn site_locations(&self, _site_ids: &[String]) -> Result<Vec<SiteLocation>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_all {
            anyhow::bail!("mock location service is down");
        }

        Ok(self.locations.clone())
    }
}
