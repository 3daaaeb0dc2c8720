//! Async client for the SmartThings cloud API.
//!
//! [`ApiClient`] covers the resource endpoints the CLI needs (apps, devices,
//! locations, rooms, rules, capabilities, schema connectors, virtual devices,
//! device history). [`lambda`] holds the AWS Lambda invoke-permission side
//! channel used by `apps authorize` and `schema authorize`.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod history;
pub mod lambda;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use history::HistoryPager;
pub use transport::TransportConfig;

/// Default production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.smartthings.com";
