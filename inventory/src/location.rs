use std::collections::HashSet;
use std::sync::Arc;

use metrics::counter;
use tracing::instrument;

use crate::clients::location::LocationClient;
use crate::model::{Address, ServiceInventory, SiteLocation};

/// Best-effort address enrichment. Any failure is logged and swallowed;
/// the batch is never resized or reordered, records whose site has no match
/// keep their original stub.
pub struct LocationEnricher {
    client: Arc<dyn LocationClient + Send + Sync>,
}

impl LocationEnricher {
    pub fn new(client: Arc<dyn LocationClient + Send + Sync>) -> LocationEnricher {
        LocationEnricher { client }
    }

    #[instrument(skip_all, fields(records = inventory.len()))]
    pub async fn enrich(&self, inventory: &mut [ServiceInventory]) {
        let site_ids = distinct_site_ids(inventory);
        if site_ids.is_empty() {
            return;
        }

        // One batched call for the whole key set, never a per-id fan-out.
        let locations = match self.client.site_locations(&site_ids).await {
            Ok(locations) => locations,
            Err(e) => {
                counter!("inventory_location_enrichment_failures_total").increment(1);
                tracing::warn!("location enrichment skipped: {}", e);
                return;
            }
        };

        tracing::debug!(
            requested = site_ids.len(),
            returned = locations.len(),
            "location batch resolved"
        );

        for record in inventory.iter_mut() {
            let Some(stub) = &record.location else {
                continue;
            };
            let Some(site_id) = stub.master_site_id.as_deref() else {
                continue;
            };
            if site_id.is_empty() {
                continue;
            }

            if let Some(site) = locations
                .iter()
                .find(|site| site.master_site_id.eq_ignore_ascii_case(site_id))
            {
                record.location = Some(site_to_address(site));
            }
        }
    }
}

fn distinct_site_ids(inventory: &[ServiceInventory]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut site_ids = Vec::new();

    for record in inventory {
        let Some(site_id) = record
            .location
            .as_ref()
            .and_then(|stub| stub.master_site_id.as_deref())
        else {
            continue;
        };
        if !site_id.is_empty() && seen.insert(site_id.to_string()) {
            site_ids.push(site_id.to_string());
        }
    }

    site_ids
}

fn site_to_address(site: &SiteLocation) -> Address {
    Address {
        master_site_id: Some(site.master_site_id.clone()),
        street_address: site.description.clone(),
        state_or_province: site.site_status_type.clone(),
        postcode: site.us_zip4.clone(),
        address_line1: site
            .address_line1
            .as_ref()
            .and_then(|line| line.address_block1.clone()),
        address_block2: site
            .addresses
            .first()
            .and_then(|block| block.address_block2.clone()),
        building_name: site
            .building
            .as_ref()
            .and_then(|building| building.building_name.clone()),
        ..Default::default()
    }
}
