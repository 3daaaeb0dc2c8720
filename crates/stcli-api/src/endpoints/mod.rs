// Per-resource endpoint methods on [`crate::ApiClient`].
//
// Each module adds an `impl ApiClient` block for one resource family,
// mirroring the path layout of the platform's public REST API.

pub mod apps;
pub mod capabilities;
pub mod devices;
pub mod locations;
pub mod rooms;
pub mod rules;
pub mod schema;
pub mod virtualdevices;
