//! Response and request types for the SmartThings cloud API.
//!
//! All types match the JSON payloads of `/v1/` endpoints. Field names use
//! camelCase via `#[serde(rename_all = "camelCase")]`; detail types carry a
//! `#[serde(flatten)] extra` catch-all for fields the CLI doesn't model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ── List envelope ────────────────────────────────────────────────────

/// Generic list wrapper returned by collection endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsList<T> {
    pub items: Vec<T>,
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
}

/// Pagination links (`_links`) on paged collection responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<Link>,
    #[serde(default)]
    pub previous: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

// ── Locations & rooms ────────────────────────────────────────────────

/// Location summary — from `GET /v1/locations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationItem {
    pub location_id: Uuid,
    pub name: String,
}

/// Full location — from `GET /v1/locations/{locationId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub location_id: Uuid,
    pub name: String,
    pub country_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub region_radius: Option<i64>,
    pub temperature_scale: Option<String>,
    pub time_zone_id: Option<String>,
    pub locale: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Room — from `GET /v1/locations/{locationId}/rooms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: Uuid,
    pub location_id: Uuid,
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

// ── Devices ──────────────────────────────────────────────────────────

/// Device — from `GET /v1/devices`.
///
/// The integration-specific section of the payload is a tagged union over
/// the `type` discriminator; each variant carries the object that is only
/// present for that integration kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: Uuid,
    pub name: Option<String>,
    pub label: Option<String>,
    pub manufacturer_name: Option<String>,
    pub location_id: Option<Uuid>,
    pub room_id: Option<Uuid>,
    pub device_type_name: Option<String>,
    #[serde(default)]
    pub components: Vec<Value>,
    #[serde(flatten)]
    pub integration: IntegrationInfo,
}

/// Integration-kind discriminator plus its kind-specific payload.
///
/// Exhaustively matched wherever the CLI branches on integration type;
/// kinds the CLI doesn't render in detail keep their payload as opaque JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum IntegrationInfo {
    #[serde(rename = "ENDPOINT_APP")]
    EndpointApp { app: Value },
    #[serde(rename = "DTH")]
    Dth { dth: Value },
    #[serde(rename = "HUB")]
    Hub {
        #[serde(default)]
        hub: Option<Value>,
    },
    #[serde(rename = "LAN")]
    Lan {
        #[serde(default)]
        lan: Option<Value>,
    },
    #[serde(rename = "ZIGBEE")]
    Zigbee {
        #[serde(default)]
        zigbee: Option<Value>,
    },
    #[serde(rename = "ZWAVE")]
    Zwave {
        #[serde(default)]
        zwave: Option<Value>,
    },
    #[serde(rename = "MATTER")]
    Matter {
        #[serde(default)]
        matter: Option<Value>,
    },
    #[serde(rename = "VIRTUAL")]
    Virtual {
        #[serde(default)]
        r#virtual: Option<Value>,
    },
    #[serde(rename = "VIPER")]
    Viper { viper: Value },
    #[serde(untagged)]
    Other {
        #[serde(rename = "type", default)]
        kind: Option<String>,
    },
}

impl IntegrationInfo {
    /// Human-readable integration kind for table output.
    pub fn kind(&self) -> &str {
        match self {
            Self::EndpointApp { .. } => "ENDPOINT_APP",
            Self::Dth { .. } => "DTH",
            Self::Hub { .. } => "HUB",
            Self::Lan { .. } => "LAN",
            Self::Zigbee { .. } => "ZIGBEE",
            Self::Zwave { .. } => "ZWAVE",
            Self::Matter { .. } => "MATTER",
            Self::Virtual { .. } => "VIRTUAL",
            Self::Viper { .. } => "VIPER",
            Self::Other { kind } => kind.as_deref().unwrap_or("UNKNOWN"),
        }
    }
}

// ── Apps ─────────────────────────────────────────────────────────────

/// App summary — from `GET /v1/apps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedApp {
    pub app_id: Uuid,
    pub app_name: String,
    pub display_name: Option<String>,
    /// One of: `LAMBDA_SMART_APP`, `WEBHOOK_SMART_APP`, `API_ONLY`.
    pub app_type: String,
    #[serde(default)]
    pub classifications: Vec<String>,
}

/// Full app — from `GET /v1/apps/{appId}` and create/update responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    pub app_id: Uuid,
    pub app_name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub app_type: String,
    #[serde(default)]
    pub classifications: Vec<String>,
    pub single_instance: Option<bool>,
    pub lambda_smart_app: Option<LambdaSmartApp>,
    pub webhook_smart_app: Option<WebhookSmartApp>,
    pub api_only: Option<Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Create/update payload for an app. Built from user-supplied JSON/YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRequest {
    pub app_name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub app_type: Option<String>,
    #[serde(default)]
    pub classifications: Vec<String>,
    pub single_instance: Option<bool>,
    pub lambda_smart_app: Option<LambdaSmartApp>,
    pub webhook_smart_app: Option<WebhookSmartApp>,
    pub api_only: Option<Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaSmartApp {
    /// Lambda function ARNs backing the app.
    #[serde(default)]
    pub functions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookSmartApp {
    pub target_url: Option<String>,
    pub public_key: Option<String>,
    pub signature_type: Option<String>,
}

// ── Rules ────────────────────────────────────────────────────────────

/// Rule — from `GET /v1/rules?locationId=…`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: Uuid,
    pub name: String,
    pub status: Option<String>,
    #[serde(default)]
    pub actions: Vec<Value>,
    pub time_zone_id: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Result of `POST /v1/rules/execute/{ruleId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleExecutionResponse {
    pub execution_id: String,
    pub id: Uuid,
    pub result: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

// ── Capabilities ─────────────────────────────────────────────────────

/// Capability summary — from `GET /v1/capabilities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitySummary {
    pub id: String,
    pub version: u32,
    pub status: Option<String>,
}

/// Full capability — from `GET /v1/capabilities/{id}/{version}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    pub id: String,
    pub version: u32,
    pub name: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
    #[serde(default)]
    pub commands: HashMap<String, Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Capability namespace — from `GET /v1/capabilities/namespaces`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityNamespace {
    pub name: String,
    pub owner_type: Option<String>,
    pub owner_id: Option<String>,
}

// ── Schema connectors ────────────────────────────────────────────────

/// Schema connector — from `GET /v1/schema/apps`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaApp {
    pub endpoint_app_id: Option<String>,
    pub app_name: Option<String>,
    pub partner_name: Option<String>,
    /// One of: `lambda`, `webhook`.
    pub hosting_type: Option<String>,
    pub schema_type: Option<String>,
    pub lambda_arn: Option<String>,
    pub lambda_arn_eu: Option<String>,
    pub lambda_arn_ap: Option<String>,
    pub lambda_arn_cn: Option<String>,
    pub webhook_url: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl SchemaApp {
    /// All configured Lambda ARNs, in region order.
    pub fn lambda_arns(&self) -> Vec<&str> {
        [
            self.lambda_arn.as_deref(),
            self.lambda_arn_eu.as_deref(),
            self.lambda_arn_ap.as_deref(),
            self.lambda_arn_cn.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Response from schema connector create/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaCreateResponse {
    pub endpoint_app_id: Option<String>,
    pub st_client_id: Option<String>,
    pub st_client_secret: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

// ── Virtual devices ──────────────────────────────────────────────────

/// Create a virtual device from a standard prototype —
/// `POST /v1/virtualdevices/standard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualDeviceCreateRequest {
    pub name: Option<String>,
    pub owner: Option<Value>,
    pub prototype: Option<String>,
    pub device_profile_id: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

// ── Device history ───────────────────────────────────────────────────

/// One attribute-change event — from `GET /v1/history/devices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceActivity {
    pub device_id: Uuid,
    pub device_name: Option<String>,
    pub location_id: Option<Uuid>,
    /// ISO 8601 date-time of the event.
    pub time: String,
    /// Epoch milliseconds; used for ordering.
    pub epoch: i64,
    pub component: String,
    pub component_label: Option<String>,
    pub capability: String,
    pub attribute: String,
    pub value: Value,
    pub unit: Option<String>,
}

/// Query parameters for device history requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceHistoryRequest {
    pub location_id: Option<Uuid>,
    pub device_id: Option<Uuid>,
    pub limit: usize,
    /// Epoch milliseconds lower bound (exclusive).
    pub after: Option<i64>,
    /// Epoch milliseconds upper bound (exclusive).
    pub before: Option<i64>,
    pub oldest_first: bool,
}
