use axum::extract::{Query, State};
use axum::Json;
use tracing::instrument;

use crate::api::{GetInventoryResponse, InventoryError, InventoryQuery, ServiceType};
use crate::router;

#[instrument(skip_all, fields(customers, service_id))]
pub async fn get_customer_inventory(
    state: State<router::AppState>,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<GetInventoryResponse>, InventoryError> {
    let customer_numbers = query.customer_numbers()?;
    let service_type = query.service_type()?;

    tracing::Span::current().record("customers", customer_numbers.join(",").as_str());
    if let Some(service_id) = &query.service_id {
        tracing::Span::current().record("service_id", service_id.as_str());
    }
    tracing::debug!(service_type = ?service_type, "inventory query");

    match service_type {
        ServiceType::Internet => {
            let response = state
                .internet
                .query(&customer_numbers, query.service_id.as_deref())
                .await?;
            Ok(Json(response))
        }
        // Port inventory is a placeholder upstream as well.
        ServiceType::Port => Err(InventoryError::PortNotImplemented),
    }
}
