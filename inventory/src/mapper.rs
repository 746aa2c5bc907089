use std::collections::{HashMap, HashSet};

use crate::api::InventoryError;
use crate::model::{
    Address, BillingAccountRef, Product, ProductCharacteristic, ResolvedAccount, ServiceInventory,
};

/// Characteristic carrying the site id used for location enrichment. Read
/// from the raw characteristic list, before the allow-list filter runs.
const MASTER_SITE_ID_ATTRIBUTE: &str = "masterSiteId";

pub fn parse_products(body: &str) -> Result<Vec<Product>, InventoryError> {
    Ok(serde_json::from_str::<Vec<Product>>(body)?)
}

/// Collect the distinct BANs referenced by the products' customer parties,
/// in first-seen order. Each BAN is looked up upstream at most once per
/// request regardless of how many products reference it.
pub fn distinct_customer_bans(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut bans = Vec::new();

    for product in products {
        let Some(parties) = &product.related_party else {
            continue;
        };
        for party in parties {
            if party.is_customer() && !party.id.is_empty() && seen.insert(party.id.clone()) {
                bans.push(party.id.clone());
            }
        }
    }

    bans
}

/// Map one catalog product to a service inventory record: copy id and
/// status, stamp the service type label, filter characteristics by the
/// allow-list, and join the first customer party against the BAN map.
///
/// A BAN that resolved to the empty pair leaves the billing fields unset;
/// that is "no data available", not an error.
pub fn map_product(
    product: &Product,
    ban_map: &HashMap<String, ResolvedAccount>,
    valid_attributes: &[String],
    service_type: &str,
) -> ServiceInventory {
    let mut inventory = ServiceInventory {
        service_id: product.id.clone(),
        service_type: Some(service_type.to_string()),
        status: product.status.clone(),
        ..Default::default()
    };

    if let Some(characteristics) = &product.product_characteristic {
        inventory.location = location_stub(characteristics);

        let filtered: Vec<ProductCharacteristic> = characteristics
            .iter()
            .filter(|characteristic| {
                valid_attributes
                    .iter()
                    .any(|name| name == &characteristic.name)
            })
            .cloned()
            .collect();
        inventory.product_characteristic = Some(filtered);
    }

    if let Some(parties) = &product.related_party {
        // First customer party wins; later ones are ignored.
        if let Some(party) = parties.iter().find(|party| party.is_customer()) {
            if let Some(resolved) = ban_map.get(&party.id) {
                if !resolved.invoice_display_number.is_empty() {
                    inventory.billing_account = Some(BillingAccountRef {
                        id: resolved.invoice_display_number.clone(),
                    });
                    inventory.customer_number = Some(resolved.customer_number.clone());
                }
            }
        }
    }

    inventory
}

fn location_stub(characteristics: &[ProductCharacteristic]) -> Option<Address> {
    characteristics
        .iter()
        .find(|characteristic| characteristic.name == MASTER_SITE_ID_ATTRIBUTE)
        .and_then(|characteristic| characteristic.value.as_deref())
        .filter(|site_id| !site_id.is_empty())
        .map(Address::stub)
}
