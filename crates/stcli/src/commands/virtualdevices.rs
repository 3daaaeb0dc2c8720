//! Virtual device command handlers.

use stcli_api::ApiClient;
use stcli_api::types::VirtualDeviceCreateRequest;
use stcli_core::io::{input_and_output_item, output_item_or_list};
use stcli_core::{ChooseOptions, CoreError, DialoguerPrompter};

use crate::cli::{GlobalOpts, VirtualDevicesArgs, VirtualDevicesCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(
    client: &ApiClient,
    args: VirtualDevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let flags = global.output_flags();
    let config = util::virtual_device_config();

    match args.command {
        None => {
            let location_id = args.location_id.as_deref();
            output_item_or_list(
                &flags,
                &config,
                args.id.as_deref(),
                true,
                || async {
                    client
                        .list_virtual_devices(location_id)
                        .await
                        .map_err(CoreError::from)
                },
                |id| async move { client.get_device(&id).await.map_err(CoreError::from) },
            )
            .await?;
            Ok(())
        }

        Some(VirtualDevicesCommand::Create { prototype, input }) => {
            input_and_output_item(
                &input.flags(),
                &flags,
                input.dry_run,
                &config.list_table_field_definitions,
                |request: VirtualDeviceCreateRequest| async move {
                    let created = if prototype {
                        client.create_virtual_device_prototype(&request).await
                    } else {
                        client.create_virtual_device_standard(&request).await
                    };
                    created.map_err(CoreError::from)
                },
            )
            .await?;
            Ok(())
        }

        Some(VirtualDevicesCommand::Delete { id }) => {
            let mut prompter = DialoguerPrompter;
            let device_id = util::choose_virtual_device(
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
    }
}
