use std::sync::Arc;

use tracing::instrument;

use crate::api::{GetInventoryResponse, InventoryError};
use crate::clients::catalog::{CatalogClient, CatalogPage};
use crate::enrichment::{self, AccountEnricher};
use crate::location::LocationEnricher;
use crate::mapper;
use crate::model::ServiceInventory;

/// Internet inventory pipeline: catalog fetch, BAN resolution, keyed merge,
/// best-effort location enrichment, serviceId filter, envelope assembly.
pub struct InternetInventory {
    catalog: Arc<dyn CatalogClient + Send + Sync>,
    accounts: AccountEnricher,
    locations: LocationEnricher,
    valid_attributes: Arc<Vec<String>>,
    product_offering_name: String,
    page: CatalogPage,
}

impl InternetInventory {
    pub fn new(
        catalog: Arc<dyn CatalogClient + Send + Sync>,
        accounts: AccountEnricher,
        locations: LocationEnricher,
        valid_attributes: Vec<String>,
        product_offering_name: String,
        page: CatalogPage,
    ) -> InternetInventory {
        InternetInventory {
            catalog,
            accounts,
            locations,
            valid_attributes: Arc::new(valid_attributes),
            product_offering_name,
            page,
        }
    }

    #[instrument(skip_all, fields(customers, records))]
    pub async fn query(
        &self,
        customer_numbers: &[String],
        service_id: Option<&str>,
    ) -> Result<GetInventoryResponse, InventoryError> {
        let customers = customer_numbers.join(",");
        tracing::Span::current().record("customers", customers.as_str());

        let body = self
            .catalog
            .internet_inventory(&customers, self.page)
            .await?;
        if body.trim().is_empty() {
            return Err(InventoryError::CatalogUnavailable(format!(
                "empty catalog response for customers: {customers}"
            )));
        }

        let products = mapper::parse_products(&body)?;
        let bans = mapper::distinct_customer_bans(&products);

        tracing::debug!(
            products = products.len(),
            bans = bans.len(),
            "catalog response parsed"
        );

        let ban_map = Arc::new(self.accounts.resolve_bans(&bans).await);
        let mut inventory = enrichment::enrich_products(
            products,
            ban_map,
            self.valid_attributes.clone(),
            &self.product_offering_name,
        )
        .await;

        if inventory.is_empty() {
            return Err(InventoryError::NoInventoryFound(customers));
        }

        self.locations.enrich(&mut inventory).await;

        if let Some(service_id) = service_id {
            inventory.retain(|record| {
                record
                    .service_id
                    .as_deref()
                    .is_some_and(|id| id.eq_ignore_ascii_case(service_id))
            });
        }

        tracing::Span::current().record("records", inventory.len());

        Ok(self.assemble(inventory))
    }

    fn assemble(&self, inventory: Vec<ServiceInventory>) -> GetInventoryResponse {
        GetInventoryResponse {
            page_number: self.page.page_number,
            page_size: self.page.page_size,
            result_count: inventory.len(),
            inventory_list: inventory,
        }
    }
}
