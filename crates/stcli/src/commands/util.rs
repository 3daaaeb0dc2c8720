//! Shared helpers for command handlers: per-resource selection configs and
//! the canonical `choose_*` helpers built on them.

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use stcli_api::ApiClient;
use stcli_api::types::Device;
use uuid::Uuid;
use stcli_core::resolve::string_translate_to_id;
use stcli_core::select::{SelectOptions, select_from_list};
use stcli_core::{ChooseOptions, CoreError, Prompter, SelectConfig, TableFieldDefinition};

use crate::error::CliError;

// ── Selection configs ───────────────────────────────────────────────

pub fn device_config() -> SelectConfig {
    SelectConfig {
        item_name: "device".into(),
        plural_item_name: None,
        primary_key_name: "deviceId".into(),
        sort_key_name: "label".into(),
        list_table_field_definitions: vec![
            TableFieldDefinition::new("label"),
            TableFieldDefinition::new("name"),
            TableFieldDefinition::new("deviceId"),
        ],
    }
}

pub fn location_config() -> SelectConfig {
    SelectConfig {
        item_name: "location".into(),
        plural_item_name: None,
        primary_key_name: "locationId".into(),
        sort_key_name: "name".into(),
        list_table_field_definitions: vec![
            TableFieldDefinition::new("name"),
            TableFieldDefinition::new("locationId"),
        ],
    }
}

pub fn room_config() -> SelectConfig {
    SelectConfig {
        item_name: "room".into(),
        plural_item_name: None,
        primary_key_name: "roomId".into(),
        sort_key_name: "name".into(),
        list_table_field_definitions: vec![
            TableFieldDefinition::new("name"),
            TableFieldDefinition::new("roomId"),
        ],
    }
}

pub fn app_config() -> SelectConfig {
    SelectConfig {
        item_name: "app".into(),
        plural_item_name: None,
        primary_key_name: "appId".into(),
        sort_key_name: "displayName".into(),
        list_table_field_definitions: vec![
            TableFieldDefinition::new("displayName"),
            TableFieldDefinition::new("appType"),
            TableFieldDefinition::new("appId"),
        ],
    }
}

pub fn rule_config() -> SelectConfig {
    SelectConfig {
        item_name: "rule".into(),
        plural_item_name: None,
        primary_key_name: "id".into(),
        sort_key_name: "name".into(),
        list_table_field_definitions: vec![
            TableFieldDefinition::new("name"),
            TableFieldDefinition::new("id"),
            TableFieldDefinition::labeled("locationId", "Location Id"),
        ],
    }
}

pub fn capability_config() -> SelectConfig {
    SelectConfig {
        item_name: "capability".into(),
        plural_item_name: Some("capabilities".into()),
        primary_key_name: "id".into(),
        sort_key_name: "id".into(),
        list_table_field_definitions: vec![
            TableFieldDefinition::new("id"),
            TableFieldDefinition::new("version"),
            TableFieldDefinition::new("status"),
        ],
    }
}

pub fn schema_config() -> SelectConfig {
    SelectConfig {
        item_name: "schema connector".into(),
        plural_item_name: Some("schema connectors".into()),
        primary_key_name: "endpointAppId".into(),
        sort_key_name: "appName".into(),
        list_table_field_definitions: vec![
            TableFieldDefinition::new("appName"),
            TableFieldDefinition::new("hostingType"),
            TableFieldDefinition::new("endpointAppId"),
        ],
    }
}

pub fn virtual_device_config() -> SelectConfig {
    SelectConfig {
        item_name: "virtual device".into(),
        plural_item_name: Some("virtual devices".into()),
        ..device_config()
    }
}

// ── Choose helpers ──────────────────────────────────────────────────

/// Resolve a device argument to an id, prompting when necessary.
pub async fn choose_device(
    client: &ApiClient,
    prompter: &mut impl Prompter,
    arg: Option<&str>,
    location_id: Option<&str>,
    options: ChooseOptions,
) -> Result<String, CliError> {
    let config = device_config();
    choose_with(prompter, &config, arg, options, || async {
        client
            .list_devices(location_id)
            .await
            .map_err(CoreError::from)
    })
    .await
}

/// Resolve a location argument to an id, prompting when necessary.
pub async fn choose_location(
    client: &ApiClient,
    prompter: &mut impl Prompter,
    arg: Option<&str>,
    options: ChooseOptions,
) -> Result<String, CliError> {
    let config = location_config();
    choose_with(prompter, &config, arg, options, || async {
        client.list_locations().await.map_err(CoreError::from)
    })
    .await
}

/// Resolve a room argument to an id within a location.
pub async fn choose_room(
    client: &ApiClient,
    prompter: &mut impl Prompter,
    arg: Option<&str>,
    location_id: &str,
    options: ChooseOptions,
) -> Result<String, CliError> {
    let config = room_config();
    choose_with(prompter, &config, arg, options, || async {
        client.list_rooms(location_id).await.map_err(CoreError::from)
    })
    .await
}

/// Resolve an app argument to an id, prompting when necessary.
pub async fn choose_app(
    client: &ApiClient,
    prompter: &mut impl Prompter,
    arg: Option<&str>,
    options: ChooseOptions,
) -> Result<String, CliError> {
    let config = app_config();
    choose_with(prompter, &config, arg, options, || async {
        client.list_apps().await.map_err(CoreError::from)
    })
    .await
}

/// Resolve a schema connector argument to an id, prompting when necessary.
pub async fn choose_schema_app(
    client: &ApiClient,
    prompter: &mut impl Prompter,
    arg: Option<&str>,
    options: ChooseOptions,
) -> Result<String, CliError> {
    let config = schema_config();
    choose_with(prompter, &config, arg, options, || async {
        client.list_schema_apps().await.map_err(CoreError::from)
    })
    .await
}

/// Resolve a capability argument to an id, prompting when necessary.
pub async fn choose_capability(
    client: &ApiClient,
    prompter: &mut impl Prompter,
    arg: Option<&str>,
    options: ChooseOptions,
) -> Result<String, CliError> {
    let config = capability_config();
    choose_with(prompter, &config, arg, options, || async {
        custom_capabilities(client, None).await
    })
    .await
}

/// Resolve a virtual device argument to an id, prompting when necessary.
pub async fn choose_virtual_device(
    client: &ApiClient,
    prompter: &mut impl Prompter,
    arg: Option<&str>,
    location_id: Option<&str>,
    options: ChooseOptions,
) -> Result<String, CliError> {
    let config = virtual_device_config();
    choose_with(prompter, &config, arg, options, || async {
        client
            .list_virtual_devices(location_id)
            .await
            .map_err(CoreError::from)
    })
    .await
}

/// Resolve a rule argument to `(rule_id, location_id)`.
///
/// Rules are location-scoped, so selection happens against the aggregate
/// list and the owning location travels with the chosen id.
pub async fn choose_rule(
    client: &ApiClient,
    prompter: &mut impl Prompter,
    arg: Option<&str>,
    location_id: Option<&str>,
    options: ChooseOptions,
) -> Result<(String, String), CliError> {
    let config = rule_config();
    let rules = rules_with_locations(client, location_id).await?;

    let rules_for_translate = rules.clone();
    let preselected = if options.allow_index {
        string_translate_to_id(
            arg,
            &config.primary_key_name,
            &config.sort_key_name,
            || async { Ok(rules_for_translate) },
        )
        .await?
    } else {
        arg.map(str::to_owned)
    };

    let select_options = SelectOptions {
        preselected_id: preselected,
        auto_choose: options.auto_choose,
        prompt_message: None,
    };
    let rules_for_select = rules.clone();
    let rule_id = select_from_list(prompter, &config, &select_options, || async {
        Ok(rules_for_select)
    })
    .await?;

    let location = rules
        .iter()
        .find(|r| r["id"].as_str() == Some(rule_id.as_str()))
        .and_then(|r| r["locationId"].as_str())
        .ok_or_else(|| CoreError::NotFound(format!("rule {rule_id}")))?;
    Ok((rule_id, location.to_owned()))
}

/// List rules across one or all locations, tagging each with its location.
pub async fn rules_with_locations(
    client: &ApiClient,
    location_id: Option<&str>,
) -> Result<Vec<Value>, CliError> {
    let location_ids: Vec<String> = match location_id {
        Some(id) => vec![id.to_owned()],
        None => client
            .list_locations()
            .await?
            .into_iter()
            .map(|l| l.location_id.to_string())
            .collect(),
    };

    let mut tagged = Vec::new();
    for id in location_ids {
        for rule in client.list_rules(&id).await? {
            let mut value = serde_json::to_value(&rule)?;
            if let Some(object) = value.as_object_mut() {
                object.insert("locationId".into(), Value::String(id.clone()));
            }
            tagged.push(value);
        }
    }
    Ok(tagged)
}

/// Custom capability summaries across the token's namespaces, or one
/// namespace when given.
pub async fn custom_capabilities(
    client: &ApiClient,
    namespace: Option<&str>,
) -> Result<Vec<stcli_api::types::CapabilitySummary>, CoreError> {
    let namespaces: Vec<String> = match namespace {
        Some(name) => vec![name.to_owned()],
        None => client
            .list_capability_namespaces()
            .await?
            .into_iter()
            .map(|n| n.name)
            .collect(),
    };

    let mut summaries = Vec::new();
    for name in namespaces {
        summaries.extend(client.list_namespaced_capabilities(&name).await?);
    }
    Ok(summaries)
}

/// Project devices to values with `location` and `room` name fields joined
/// in, for verbose listings.
pub async fn with_locations_and_rooms(
    client: &ApiClient,
    devices: Vec<Device>,
) -> Result<Vec<Value>, CoreError> {
    let location_names: HashMap<Uuid, String> = client
        .list_locations()
        .await?
        .into_iter()
        .map(|l| (l.location_id, l.name))
        .collect();

    let location_ids: HashSet<Uuid> = devices.iter().filter_map(|d| d.location_id).collect();
    let mut room_names: HashMap<(Uuid, Uuid), String> = HashMap::new();
    for location_id in location_ids {
        for room in client.list_rooms(&location_id.to_string()).await? {
            room_names.insert(
                (location_id, room.room_id),
                room.name.unwrap_or_default(),
            );
        }
    }

    devices
        .into_iter()
        .map(|device| {
            let location = device
                .location_id
                .and_then(|id| location_names.get(&id).cloned())
                .unwrap_or_default();
            let room = match (device.location_id, device.room_id) {
                (Some(location_id), Some(room_id)) => room_names
                    .get(&(location_id, room_id))
                    .cloned()
                    .unwrap_or_default(),
                _ => String::new(),
            };
            let mut value = serde_json::to_value(device)?;
            if let Some(object) = value.as_object_mut() {
                object.insert("location".into(), Value::String(location));
                object.insert("room".into(), Value::String(room));
            }
            Ok(value)
        })
        .collect()
}

/// Single-device variant of [`with_locations_and_rooms`].
pub async fn with_location_and_room(
    client: &ApiClient,
    device: Device,
) -> Result<Value, CoreError> {
    let mut values = with_locations_and_rooms(client, vec![device]).await?;
    Ok(values.pop().unwrap_or(Value::Null))
}

/// Common body of the `choose_*` helpers: optional index translation, then
/// selection.
async fn choose_with<T, F, Fut>(
    prompter: &mut impl Prompter,
    config: &SelectConfig,
    arg: Option<&str>,
    options: ChooseOptions,
    list_items: F,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Vec<T>, CoreError>>,
{
    let preselected = if options.allow_index {
        string_translate_to_id(
            arg,
            &config.primary_key_name,
            &config.sort_key_name,
            &list_items,
        )
        .await?
    } else {
        arg.map(str::to_owned)
    };

    let select_options = SelectOptions {
        preselected_id: preselected,
        auto_choose: options.auto_choose,
        prompt_message: None,
    };
    let id = select_from_list(prompter, config, &select_options, &list_items).await?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stcli_api::TransportConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn device(device_id: &str, location_id: Option<&str>, room_id: Option<&str>) -> Device {
        serde_json::from_value(json!({
            "deviceId": device_id,
            "label": "Lamp",
            "name": "lamp",
            "locationId": location_id,
            "roomId": room_id,
            "type": "VIRTUAL",
        }))
        .unwrap()
    }

    async fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::from_token(
            server.uri().as_str(),
            &secrecy::SecretString::from("token"),
            &TransportConfig::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn verbose_join_adds_location_and_room_names() {
        let location = "f9a0fbbc-8de5-4b27-8b8b-6e25e6a25c17";
        let room = "6f2dbd7e-3c63-4e23-ba92-bc53a1a52a3b";

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/locations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"locationId": location, "name": "Home"}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/v1/locations/{location}/rooms")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"roomId": room, "locationId": location, "name": "Kitchen"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let devices = vec![
            device("0ad81b9e-59d8-4e0c-9714-5dbd45b6bb22", Some(location), Some(room)),
            device("1bd81b9e-59d8-4e0c-9714-5dbd45b6bb33", Some(location), None),
            device("2cd81b9e-59d8-4e0c-9714-5dbd45b6bb44", None, None),
        ];

        let values = with_locations_and_rooms(&client, devices).await.unwrap();
        assert_eq!(values[0]["location"], "Home");
        assert_eq!(values[0]["room"], "Kitchen");
        assert_eq!(values[1]["location"], "Home");
        assert_eq!(values[1]["room"], "");
        assert_eq!(values[2]["location"], "");
        assert_eq!(values[2]["room"], "");
    }
}
