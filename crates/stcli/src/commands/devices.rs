//! Device command handlers.

use stcli_api::ApiClient;
use stcli_api::types::DeviceHistoryRequest;
use stcli_core::format::{IoFormat, calculate_output_format, json_formatter, write_output, yaml_formatter};
use stcli_core::history::{
    DeviceActivityOptions, calculate_request_limit, get_history, sort_events,
    write_device_events_table,
};
use stcli_core::io::output_item_or_list;
use stcli_core::{ChooseOptions, CoreError, DialoguerPrompter};
use uuid::Uuid;

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;

use super::util;

const UTC_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

fn parse_uuid(field: &str, value: &str) -> Result<Uuid, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.to_owned(),
        reason: format!("expected a UUID, got '{value}'"),
    })
}

pub async fn handle(
    client: &ApiClient,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let flags = global.output_flags();

    match args.command {
        None => {
            let mut config = util::device_config();
            let location_id = args.location_id.as_deref();
            // `-v` enriches device output with location and room names.
            let verbose = global.verbose > 0;
            if verbose {
                let id_column = config.list_table_field_definitions.len().saturating_sub(1);
                config.list_table_field_definitions.splice(
                    id_column..id_column,
                    [
                        stcli_core::TableFieldDefinition::new("location"),
                        stcli_core::TableFieldDefinition::new("room"),
                    ],
                );
            }
            output_item_or_list(
                &flags,
                &config,
                args.id.as_deref(),
                true,
                || async {
                    let devices = client
                        .list_devices(location_id)
                        .await
                        .map_err(CoreError::from)?;
                    if verbose {
                        util::with_locations_and_rooms(client, devices).await
                    } else {
                        devices
                            .into_iter()
                            .map(|d| serde_json::to_value(d).map_err(CoreError::from))
                            .collect()
                    }
                },
                |id| async move {
                    let device = client.get_device(&id).await.map_err(CoreError::from)?;
                    if verbose {
                        util::with_location_and_room(client, device).await
                    } else {
                        serde_json::to_value(device).map_err(CoreError::from)
                    }
                },
            )
            .await?;
            Ok(())
        }

        Some(DevicesCommand::Delete { id }) => {
            let mut prompter = DialoguerPrompter;
            let device_id = util::choose_device(
                client,
                &mut prompter,
                id.as_deref(),
                args.location_id.as_deref(),
                ChooseOptions {
                    allow_index: true,
                    ..ChooseOptions::default()
                },
            )
            .await?;
            client.delete_device(&device_id).await?;
            println!("Device {device_id} deleted.");
            Ok(())
        }

        Some(DevicesCommand::History {
            id,
            location_id,
            limit,
            after,
            before,
            utc,
        }) => {
            let mut prompter = DialoguerPrompter;
            let device_id = util::choose_device(
                client,
                &mut prompter,
                id.as_deref(),
                location_id.as_deref(),
                ChooseOptions {
                    allow_index: true,
                    auto_choose: true,
                },
            )
            .await?;

            let request = DeviceHistoryRequest {
                device_id: Some(parse_uuid("device", &device_id)?),
                location_id: location_id
                    .as_deref()
                    .map(|l| parse_uuid("location-id", l))
                    .transpose()?,
                limit: calculate_request_limit(limit),
                after,
                before,
                oldest_first: false,
            };

            let activity_options = DeviceActivityOptions {
                include_name: false,
                utc_time_format: utc.then(|| UTC_TIME_FORMAT.to_owned()),
            };

            match calculate_output_format(&flags, None) {
                IoFormat::Common => {
                    // Interactive page-at-a-time display.
                    let mut pager = client.device_history(&request).await?;
                    write_device_events_table(&mut prompter, &mut pager, &activity_options)
                        .await?;
                }
                format => {
                    let mut events = get_history(
                        client,
                        &mut prompter,
                        limit,
                        calculate_request_limit(limit),
                        &request,
                    )
                    .await?;
                    sort_events(&mut events);
                    let rendered = match format {
                        IoFormat::Yaml => yaml_formatter(&events)?,
                        _ => json_formatter(&events)?,
                    };
                    write_output(&rendered, flags.output.as_deref())?;
                }
            }
            Ok(())
        }
    }
}
