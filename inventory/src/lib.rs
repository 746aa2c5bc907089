pub mod api;
pub mod clients;
pub mod config;
pub mod enrichment;
pub mod internet;
pub mod location;
pub mod mapper;
pub mod metrics;
pub mod model;
pub mod query;
pub mod router;
pub mod server;
