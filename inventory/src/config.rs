use std::net::SocketAddr;

use envconfig::Envconfig;

#[derive(Envconfig, Clone)]
pub struct Config {
    #[envconfig(default = "127.0.0.1:3002")]
    pub address: SocketAddr,

    #[envconfig(default = "http://localhost:8081")]
    pub catalog_url: String,

    #[envconfig(default = "http://localhost:8082")]
    pub account_url: String,

    #[envconfig(default = "http://localhost:8083")]
    pub location_url: String,

    /// Per-call timeout applied to every upstream lookup.
    #[envconfig(default = "30")]
    pub upstream_timeout_secs: u64,

    /// Maximum number of concurrent BAN lookups per request.
    #[envconfig(default = "10")]
    pub ban_lookup_concurrency: usize,

    /// Comma-separated allow-list of product characteristic names kept in
    /// responses. Everything else is dropped.
    #[envconfig(default = "")]
    pub valid_attribute_list: String,

    /// Service type label stamped on every enriched record.
    #[envconfig(default = "Internet")]
    pub product_offering_name: String,

    #[envconfig(default = "100")]
    pub max_page_size: u32,

    #[envconfig(default = "true")]
    pub export_prometheus: bool,
}

impl Config {
    pub fn valid_attributes(&self) -> Vec<String> {
        self.valid_attribute_list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    }
}
