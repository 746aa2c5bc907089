use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ServiceInventory;

pub const SERVICE_TYPE_INTERNET: &str = "Internet";
pub const SERVICE_TYPE_PORT: &str = "Port";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Internet,
    Port,
}

impl ServiceType {
    pub fn parse(value: &str) -> Result<ServiceType, InventoryError> {
        if value.eq_ignore_ascii_case(SERVICE_TYPE_INTERNET) {
            Ok(ServiceType::Internet)
        } else if value.eq_ignore_ascii_case(SERVICE_TYPE_PORT) {
            Ok(ServiceType::Port)
        } else {
            Err(InventoryError::InvalidServiceType(value.to_string()))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryQuery {
    /// Comma-separated customer numbers, e.g. "15182,6887,2-LK2D1Y".
    #[serde(default)]
    pub customer_numbers: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub service_id: Option<String>,
}

impl InventoryQuery {
    pub fn customer_numbers(&self) -> Result<Vec<String>, InventoryError> {
        let numbers: Vec<String> = self
            .customer_numbers
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|number| !number.is_empty())
            .map(String::from)
            .collect();

        if numbers.is_empty() {
            return Err(InventoryError::MissingCustomerNumbers);
        }
        Ok(numbers)
    }

    /// Absent serviceType defaults to Internet.
    pub fn service_type(&self) -> Result<ServiceType, InventoryError> {
        match self.service_type.as_deref() {
            None => Ok(ServiceType::Internet),
            Some(value) => ServiceType::parse(value),
        }
    }
}

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("at least one customer number is required")]
    MissingCustomerNumbers,
    #[error("invalid serviceType: {0}, allowed values: Internet, Port")]
    InvalidServiceType(String),

    #[error("catalog service unavailable: {0}")]
    CatalogUnavailable(String),
    #[error("failed to parse catalog response: {0}")]
    CatalogParsingError(#[from] serde_json::Error),

    #[error("no inventory records found after enrichment for customers: {0}")]
    NoInventoryFound(String),

    #[error("Port inventory is not supported yet")]
    PortNotImplemented,
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        match self {
            InventoryError::MissingCustomerNumbers | InventoryError::InvalidServiceType(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            InventoryError::CatalogUnavailable(_) | InventoryError::CatalogParsingError(_) => {
                (StatusCode::BAD_GATEWAY, self.to_string())
            }

            InventoryError::NoInventoryFound(_) => (StatusCode::NOT_FOUND, self.to_string()),

            InventoryError::PortNotImplemented => (StatusCode::NOT_IMPLEMENTED, self.to_string()),
        }
        .into_response()
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetInventoryResponse {
    /// Always present, possibly empty. Never null.
    pub inventory_list: Vec<ServiceInventory>,
    pub page_number: u32,
    pub page_size: u32,
    pub result_count: usize,
}
