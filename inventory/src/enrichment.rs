use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use metrics::counter;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::instrument;

use crate::clients::account::AccountClient;
use crate::mapper;
use crate::model::{Product, ResolvedAccount, ServiceInventory};

/// Resolves BANs against the account service with a bounded per-request
/// fan-out and joins the results onto catalog products.
pub struct AccountEnricher {
    client: Arc<dyn AccountClient + Send + Sync>,
    concurrency: usize,
}

impl AccountEnricher {
    pub fn new(client: Arc<dyn AccountClient + Send + Sync>, concurrency: usize) -> AccountEnricher {
        AccountEnricher {
            client,
            concurrency: concurrency.max(1),
        }
    }

    /// Resolve every BAN to its invoice display number and customer number.
    ///
    /// The returned map always covers the full input set: a BAN whose lookup
    /// fails, times out, or matches nothing maps to the empty pair. One
    /// failing key never aborts its siblings. At most `concurrency` lookups
    /// are in flight at any moment.
    #[instrument(skip_all, fields(bans = bans.len()))]
    pub async fn resolve_bans(&self, bans: &[String]) -> HashMap<String, ResolvedAccount> {
        if bans.is_empty() {
            return HashMap::new();
        }

        let budget = self.concurrency.min(bans.len());
        let semaphore = Arc::new(Semaphore::new(budget));
        let mut set = JoinSet::new();

        for ban in bans {
            let client = self.client.clone();
            let semaphore = semaphore.clone();
            let ban = ban.clone();

            set.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("semaphore has been closed");
                let resolved = resolve_single(client, &ban).await;
                (ban, resolved)
            });
        }

        let mut resolved_bans: HashMap<String, ResolvedAccount> =
            HashMap::with_capacity(bans.len());
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((ban, resolved)) => match resolved_bans.entry(ban) {
                    // Distinct inputs cannot collide, but if a key is ever
                    // written twice, keep the non-empty value.
                    Entry::Occupied(mut slot) => {
                        if slot.get().is_empty() && !resolved.is_empty() {
                            slot.insert(resolved);
                        }
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(resolved);
                    }
                },
                Err(e) => {
                    tracing::error!("BAN resolution task panicked: {}", e);
                }
            }
        }

        // Totality: every input key resolves, if only to the sentinel.
        for ban in bans {
            resolved_bans.entry(ban.clone()).or_default();
        }

        resolved_bans
    }
}

async fn resolve_single(
    client: Arc<dyn AccountClient + Send + Sync>,
    ban: &str,
) -> ResolvedAccount {
    counter!("inventory_ban_lookups_total").increment(1);

    match client.billing_accounts(ban).await {
        Ok(body) => match body.billing_accounts.first() {
            Some(entry) => ResolvedAccount {
                invoice_display_number: entry.id.clone().unwrap_or_default(),
                customer_number: body.customer_number.clone().unwrap_or_default(),
            },
            None => ResolvedAccount::default(),
        },
        Err(e) => {
            counter!("inventory_ban_lookup_failures_total").increment(1);
            tracing::error!("failed to resolve BAN {}: {}", ban, e);
            ResolvedAccount::default()
        }
    }
}

/// Merge catalog products with the resolved BAN map in parallel.
///
/// Tasks are scattered with their input index and gathered into an
/// index-addressed buffer, so output order always matches input order no
/// matter how tasks complete. Output length always equals input length.
#[instrument(skip_all, fields(products = products.len()))]
pub async fn enrich_products(
    products: Vec<Product>,
    ban_map: Arc<HashMap<String, ResolvedAccount>>,
    valid_attributes: Arc<Vec<String>>,
    service_type: &str,
) -> Vec<ServiceInventory> {
    let total = products.len();
    let mut set = JoinSet::new();

    for (index, product) in products.into_iter().enumerate() {
        let ban_map = ban_map.clone();
        let valid_attributes = valid_attributes.clone();
        let service_type = service_type.to_string();

        set.spawn(async move {
            let mapped = mapper::map_product(&product, &ban_map, &valid_attributes, &service_type);
            (index, mapped)
        });
    }

    let mut slots: Vec<Option<ServiceInventory>> = (0..total).map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, mapped)) => slots[index] = Some(mapped),
            Err(e) => {
                tracing::error!("product mapping task panicked: {}", e);
            }
        }
    }

    counter!("inventory_records_enriched_total").increment(total as u64);

    slots
        .into_iter()
        .map(|slot| slot.unwrap_or_default())
        .collect()
}
