use std::collections::HashMap;

use anyhow::Result;
use assert_json_diff::assert_json_include;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::common::*;
mod common;

fn catalog_body() -> String {
    json!([
        {
            "id": "SVC1001",
            "status": "active",
            "productCharacteristic": [
                {"name": "bandwidth", "value": "100M"},
                {"name": "internalFlag", "value": "true"},
                {"name": "masterSiteId", "value": "MS-1"}
            ],
            "relatedParty": [{"id": "B1", "referredType": "Customer"}]
        },
        {
            "id": "SVC1002",
            "status": "active",
            "relatedParty": [{"id": "B1", "referredType": "Customer"}]
        },
        {
            "id": "SVC1003",
            "status": "suspended",
            "relatedParty": [{"id": "B404", "referredType": "Customer"}]
        }
    ])
    .to_string()
}

fn accounts() -> HashMap<String, (String, String)> {
    HashMap::from([(
        "B1".to_string(),
        ("INV-100".to_string(), "CUST-7".to_string()),
    )])
}

fn sites() -> Vec<Value> {
    vec![json!({
        "MasterSiteId": "MS-1",
        "Description": "600 Main St",
        "SiteStatusType": "Active",
        "USZip4": "80202-1234",
        "Building": {"BuildingName": "Main Plaza"}
    })]
}

#[tokio::test]
async fn it_returns_enriched_inventory() -> Result<()> {
    let catalog = catalog_upstream(catalog_body()).await;
    let account = account_upstream(accounts()).await;
    let location = location_upstream(sites()).await;

    let server = ServerHandle::for_config(test_config(catalog, account, location)).await;
    let res = server
        .send_inventory_request("customerNumbers=15182,6887&serviceType=Internet")
        .await;
    assert_eq!(StatusCode::OK, res.status());

    let json_data = res.json::<Value>().await?;

    assert_json_include!(
        actual: json_data.clone(),
        expected: json!({
            "resultCount": 3,
            "pageNumber": 1,
            "pageSize": 20,
            "inventoryList": [
                {
                    "serviceId": "SVC1001",
                    "serviceType": "Internet",
                    "status": "active",
                    "billingAccount": {"id": "INV-100"},
                    "customerNumber": "CUST-7",
                    "productCharacteristic": [{"name": "bandwidth", "value": "100M"}],
                    "location": {
                        "masterSiteid": "MS-1",
                        "streetAddress": "600 Main St",
                        "postcode": "80202-1234",
                        "buildingName": "Main Plaza"
                    }
                },
                {
                    "serviceId": "SVC1002",
                    "billingAccount": {"id": "INV-100"}
                },
                {
                    "serviceId": "SVC1003",
                    "status": "suspended"
                }
            ]
        })
    );

    // B404 resolved to the empty pair: no billing fields on SVC1003.
    let third = &json_data["inventoryList"][2];
    assert!(third.get("billingAccount").is_none());
    assert!(third.get("customerNumber").is_none());

    Ok(())
}

#[tokio::test]
async fn it_fails_with_bad_gateway_when_catalog_body_is_empty() {
    let catalog = catalog_upstream(String::new()).await;
    let account = account_upstream(accounts()).await;
    let location = location_upstream(vec![]).await;

    let server = ServerHandle::for_config(test_config(catalog, account, location)).await;
    let res = server.send_inventory_request("customerNumbers=15182").await;

    assert_eq!(StatusCode::BAD_GATEWAY, res.status());
}

#[tokio::test]
async fn it_fails_with_bad_gateway_when_catalog_is_down() {
    let broken = broken_upstream().await;
    let account = account_upstream(accounts()).await;
    let location = location_upstream(vec![]).await;

    let server = ServerHandle::for_config(test_config(broken, account, location)).await;
    let res = server.send_inventory_request("customerNumbers=15182").await;

    assert_eq!(StatusCode::BAD_GATEWAY, res.status());
}

#[tokio::test]
async fn it_returns_not_found_when_enrichment_yields_no_records() {
    let catalog = catalog_upstream("[]".to_string()).await;
    let account = account_upstream(accounts()).await;
    let location = location_upstream(vec![]).await;

    let server = ServerHandle::for_config(test_config(catalog, account, location)).await;
    let res = server.send_inventory_request("customerNumbers=15182").await;

    assert_eq!(StatusCode::NOT_FOUND, res.status());
}

#[tokio::test]
async fn it_returns_an_empty_list_for_an_unmatched_service_id() -> Result<()> {
    let catalog = catalog_upstream(catalog_body()).await;
    let account = account_upstream(accounts()).await;
    let location = location_upstream(sites()).await;

    let server = ServerHandle::for_config(test_config(catalog, account, location)).await;
    let res = server
        .send_inventory_request("customerNumbers=15182&serviceId=SVC9999")
        .await;
    assert_eq!(StatusCode::OK, res.status());

    let json_data = res.json::<Value>().await?;
    assert_eq!(json_data["inventoryList"], json!([]));
    assert_eq!(json_data["resultCount"], json!(0));

    Ok(())
}

#[tokio::test]
async fn it_rejects_port_inventory_as_not_implemented() {
    let catalog = catalog_upstream(catalog_body()).await;
    let account = account_upstream(accounts()).await;
    let location = location_upstream(vec![]).await;

    let server = ServerHandle::for_config(test_config(catalog, account, location)).await;
    let res = server
        .send_inventory_request("customerNumbers=15182&serviceType=Port")
        .await;

    assert_eq!(StatusCode::NOT_IMPLEMENTED, res.status());
}

#[tokio::test]
async fn it_rejects_requests_without_customer_numbers() {
    let catalog = catalog_upstream(catalog_body()).await;
    let account = account_upstream(accounts()).await;
    let location = location_upstream(vec![]).await;

    let server = ServerHandle::for_config(test_config(catalog, account, location)).await;

    let res = server.send_inventory_request("serviceType=Internet").await;
    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    let res = server.send_inventory_request("customerNumbers=").await;
    assert_eq!(StatusCode::BAD_REQUEST, res.status());
}

#[tokio::test]
async fn it_rejects_unknown_service_types() {
    let catalog = catalog_upstream(catalog_body()).await;
    let account = account_upstream(accounts()).await;
    let location = location_upstream(vec![]).await;

    let server = ServerHandle::for_config(test_config(catalog, account, location)).await;
    let res = server
        .send_inventory_request("customerNumbers=15182&serviceType=Voice")
        .await;

    assert_eq!(StatusCode::BAD_REQUEST, res.status());
}

#[tokio::test]
async fn it_survives_an_account_service_outage() -> Result<()> {
    let catalog = catalog_upstream(catalog_body()).await;
    let broken = broken_upstream().await;
    let location = location_upstream(sites()).await;

    let server = ServerHandle::for_config(test_config(catalog, broken, location)).await;
    let res = server.send_inventory_request("customerNumbers=15182").await;
    assert_eq!(StatusCode::OK, res.status());

    let json_data = res.json::<Value>().await?;
    assert_eq!(json_data["resultCount"], json!(3));
    for record in json_data["inventoryList"].as_array().unwrap() {
        assert!(record.get("billingAccount").is_none());
    }

    Ok(())
}

#[tokio::test]
async fn it_survives_a_location_service_outage() -> Result<()> {
    let catalog = catalog_upstream(catalog_body()).await;
    let account = account_upstream(accounts()).await;
    let broken = broken_upstream().await;

    let server = ServerHandle::for_config(test_config(catalog, account, broken)).await;
    let res = server.send_inventory_request("customerNumbers=15182").await;
    assert_eq!(StatusCode::OK, res.status());

    // The partial stub survives untouched when the batch call fails.
    let json_data = res.json::<Value>().await?;
    assert_json_include!(
        actual: json_data.clone(),
        expected: json!({
            "inventoryList": [{
                "serviceId": "SVC1001",
                "location": {"masterSiteid": "MS-1"}
            }]
        })
    );
    let location = &json_data["inventoryList"][0]["location"];
    assert!(location.get("streetAddress").is_none());

    Ok(())
}

#[tokio::test]
async fn it_answers_the_index_route() {
    let catalog = catalog_upstream(catalog_body()).await;
    let account = account_upstream(accounts()).await;
    let location = location_upstream(vec![]).await;

    let server = ServerHandle::for_config(test_config(catalog, account, location)).await;

    let res = reqwest::get(format!("http://{}/", server.addr)).await.unwrap();
    assert_eq!(StatusCode::OK, res.status());
    assert_eq!("product inventory", res.text().await.unwrap());
}

#[tokio::test]
async fn it_handles_arbitrary_customer_numbers() {
    let catalog = catalog_upstream(catalog_body()).await;
    let account = account_upstream(accounts()).await;
    let location = location_upstream(vec![]).await;

    let server = ServerHandle::for_config(test_config(catalog, account, location)).await;

    let customer = random_string("cust", 12);
    let res = server
        .send_inventory_request(&format!("customerNumbers={customer}"))
        .await;

    assert_eq!(StatusCode::OK, res.status());
}
