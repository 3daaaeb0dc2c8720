//! Room command handlers. Rooms are always scoped to a location; when no
//! location flag is given the user picks one first.

use serde_json::Value;
use stcli_api::ApiClient;
use stcli_core::io::{input_and_output_item, output_item_or_list};
use stcli_core::{ChooseOptions, CoreError, DialoguerPrompter, Prompter};

use crate::cli::{GlobalOpts, RoomsArgs, RoomsCommand};
use crate::error::CliError;

use super::util;

async fn resolve_location(
    client: &ApiClient,
    prompter: &mut impl Prompter,
    location_id: Option<&str>,
) -> Result<String, CliError> {
    util::choose_location(
        client,
        prompter,
        location_id,
        ChooseOptions {
            allow_index: true,
            auto_choose: true,
        },
    )
    .await
}

pub async fn handle(
    client: &ApiClient,
    args: RoomsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let flags = global.output_flags();
    let config = util::room_config();
    let mut prompter = DialoguerPrompter;

    match args.command {
        None => {
            let location_id =
                resolve_location(client, &mut prompter, args.location_id.as_deref()).await?;
            let get_location = location_id.clone();
            output_item_or_list(
                &flags,
                &config,
                args.id.as_deref(),
                true,
                || async {
                    client
                        .list_rooms(&location_id)
                        .await
                        .map_err(CoreError::from)
                },
                |id| async move {
                    client
                        .get_room(&get_location, &id)
                        .await
                        .map_err(CoreError::from)
                },
            )
            .await?;
            Ok(())
        }

        Some(RoomsCommand::Create { location_id, input }) => {
            let location_id =
                resolve_location(client, &mut prompter, location_id.as_deref()).await?;
            input_and_output_item(
                &input.flags(),
                &flags,
                input.dry_run,
                &config.list_table_field_definitions,
                |room: Value| async move {
                    client
                        .create_room(&location_id, &room)
                        .await
                        .map_err(CoreError::from)
                },
            )
            .await?;
            Ok(())
        }

        Some(RoomsCommand::Update {
            id,
            location_id,
            input,
        }) => {
            let location_id =
                resolve_location(client, &mut prompter, location_id.as_deref()).await?;
            let room_id = util::choose_room(
                client,
                &mut prompter,
                id.as_deref(),
                &location_id,
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
                |room: Value| async move {
                    client
                        .update_room(&location_id, &room_id, &room)
                        .await
                        .map_err(CoreError::from)
                },
            )
            .await?;
            Ok(())
        }

        Some(RoomsCommand::Delete { id, location_id }) => {
            let location_id =
                resolve_location(client, &mut prompter, location_id.as_deref()).await?;
            let room_id = util::choose_room(
                client,
                &mut prompter,
                id.as_deref(),
                &location_id,
                ChooseOptions {
                    allow_index: true,
                    ..ChooseOptions::default()
                },
            )
            .await?;
            client.delete_room(&location_id, &room_id).await?;
            println!("Room {room_id} deleted.");
            Ok(())
        }
    }
}
