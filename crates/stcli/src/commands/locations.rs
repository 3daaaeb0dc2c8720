//! Location command handlers.

use serde_json::Value;
use stcli_core::io::{input_and_output_item, output_item_or_list};
use stcli_core::{ChooseOptions, CoreError, DialoguerPrompter};
use stcli_api::ApiClient;

use crate::cli::{GlobalOpts, LocationsArgs, LocationsCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(
    client: &ApiClient,
    args: LocationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let flags = global.output_flags();
    let config = util::location_config();

    match args.command {
        None => {
            output_item_or_list(
                &flags,
                &config,
                args.id.as_deref(),
                true,
                || async { client.list_locations().await.map_err(CoreError::from) },
                |id| async move { client.get_location(&id).await.map_err(CoreError::from) },
            )
            .await?;
            Ok(())
        }

        Some(LocationsCommand::Create { input }) => {
            input_and_output_item(
                &input.flags(),
                &flags,
                input.dry_run,
                &config.list_table_field_definitions,
                |location: Value| async move {
                    client
                        .create_location(&location)
                        .await
                        .map_err(CoreError::from)
                },
            )
            .await?;
            Ok(())
        }

        Some(LocationsCommand::Update { id, input }) => {
            let mut prompter = DialoguerPrompter;
            let location_id = util::choose_location(
                client,
                &mut prompter,
                id.as_deref(),
                ChooseOptions {
                    allow_index: true,
                    ..ChooseOptions::default()
                },
            )
            .await?;
            input_and_output_item(
                &input.flags(),
                &flags,
                input.dry_run,
                &config.list_table_field_definitions,
                |location: Value| async move {
                    client
                        .update_location(&location_id, &location)
                        .await
                        .map_err(CoreError::from)
                },
            )
            .await?;
            Ok(())
        }

        Some(LocationsCommand::Delete { id }) => {
            let mut prompter = DialoguerPrompter;
            let location_id = util::choose_location(
                client,
                &mut prompter,
                id.as_deref(),
                ChooseOptions {
                    allow_index: true,
                    ..ChooseOptions::default()
                },
            )
            .await?;
            client.delete_location(&location_id).await?;
            println!("Location {location_id} deleted.");
            Ok(())
        }
    }
}
