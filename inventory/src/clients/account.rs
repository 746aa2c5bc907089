use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::{BillingAccountEntry, BillingAccountsBody};

/// Account service lookup for a single BAN. Failures here are recoverable:
/// the caller degrades the BAN to the empty pair instead of propagating.
#[async_trait]
pub trait AccountClient {
    async fn billing_accounts(&self, ban: &str) -> Result<BillingAccountsBody>;
}

pub struct HttpAccountClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAccountClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<HttpAccountClient> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Product Inventory Service")
            .build()?;

        Ok(HttpAccountClient { client, base_url })
    }
}

#[async_trait]
impl AccountClient for HttpAccountClient {
    async fn billing_accounts(&self, ban: &str) -> Result<BillingAccountsBody> {
        let url = format!("{}/billing-accounts", self.base_url);

        let response = self
            .client
            .get(url)
            .header("x-customer-number", ban)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<BillingAccountsBody>().await?)
    }
}

/// Counts lookups so tests can assert deduplication, and serves canned
/// per-BAN responses.
#[derive(Clone, Default)]
pub struct MockAccountClient {
    accounts: HashMap<String, BillingAccountsBody>,
    fail_all: bool,
    calls: Arc<AtomicUsize>,
}

impl MockAccountClient {
    pub fn new() -> MockAccountClient {
        MockAccountClient::default()
    }

    pub fn with_account(
        mut self,
        ban: &str,
        invoice_display_number: &str,
        customer_number: &str,
    ) -> MockAccountClient {
        self.accounts.insert(
            ban.to_string(),
            BillingAccountsBody {
                billing_accounts: vec![BillingAccountEntry {
                    id: Some(invoice_display_number.to_string()),
                    name: None,
                }],
                customer_number: Some(customer_number.to_string()),
            },
        );
        self
    }

    pub fn failing() -> MockAccountClient {
        MockAccountClient {
            fail_all: true,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountClient for MockAccountClient {
    async fn billing_accounts(&self, ban: &str) -> Result<BillingAccountsBody> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_all {
            anyhow::bail!("mock account service is down");
        }

        Ok(self.accounts.get(ban).cloned().unwrap_or_default())
    }
}
