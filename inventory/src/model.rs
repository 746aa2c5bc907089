use serde::{Deserialize, Serialize};

/// A raw catalog record as returned by the catalog service. Never mutated;
/// the pipeline owns it for the duration of one request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_characteristic: Option<Vec<ProductCharacteristic>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_party: Option<Vec<RelatedParty>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCharacteristic {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A party related to a product. Enrichment only acts on parties whose
/// referred type is "Customer" (case-insensitive); their id is the BAN.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedParty {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, alias = "@referredType", skip_serializing_if = "Option::is_none")]
    pub referred_type: Option<String>,
}

impl RelatedParty {
    pub fn is_customer(&self) -> bool {
        self.referred_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("Customer"))
    }
}

/// One account-service resolution for a BAN. Both fields may be empty: the
/// empty pair is the "no data available" sentinel, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAccount {
    pub invoice_display_number: String,
    pub customer_number: String,
}

impl ResolvedAccount {
    pub fn is_empty(&self) -> bool {
        self.invoice_display_number.is_empty() && self.customer_number.is_empty()
    }
}

/// The unit returned to callers: a catalog record joined with its resolved
/// billing account and, where possible, a site address.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInventory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_account: Option<BillingAccountRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_characteristic: Option<Vec<ProductCharacteristic>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAccountRef {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, rename = "masterSiteid", skip_serializing_if = "Option::is_none")]
    pub master_site_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_or_province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode_extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_block2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_name: Option<String>,
}

impl Address {
    /// A stub carrying only the site id, filled in later by the location
    /// enricher when the batch lookup finds a match.
    pub fn stub(master_site_id: &str) -> Address {
        Address {
            master_site_id: Some(master_site_id.to_string()),
            ..Default::default()
        }
    }
}

/// Account service response body: zero-or-one billing accounts plus a
/// top-level customer number.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAccountsBody {
    #[serde(default)]
    pub billing_accounts: Vec<BillingAccountEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAccountEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One entry of the location service's batched site lookup. The upstream
/// uses PascalCase keys.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SiteLocation {
    #[serde(rename = "MasterSiteId")]
    pub master_site_id: String,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "SiteStatusType", default, skip_serializing_if = "Option::is_none")]
    pub site_status_type: Option<String>,
    #[serde(rename = "USZip4", default, skip_serializing_if = "Option::is_none")]
    pub us_zip4: Option<String>,
    #[serde(rename = "AddressLine1", default, skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<SiteAddressLine>,
    #[serde(rename = "Addresses", default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<SiteAddressBlock>,
    #[serde(rename = "Building", default, skip_serializing_if = "Option::is_none")]
    pub building: Option<SiteBuilding>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SiteAddressLine {
    #[serde(rename = "AddressBlock1", default, skip_serializing_if = "Option::is_none")]
    pub address_block1: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SiteAddressBlock {
    #[serde(rename = "AddressBlock2", default, skip_serializing_if = "Option::is_none")]
    pub address_block2: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SiteBuilding {
    #[serde(rename = "BuildingName", default, skip_serializing_if = "Option::is_none")]
    pub building_name: Option<String>,
}
