//! Custom capability command handlers.

use serde_json::Value;
use stcli_api::ApiClient;
use stcli_core::io::{input_and_output_item, output_item_or_list};
use stcli_core::{ChooseOptions, CoreError, DialoguerPrompter};

use crate::cli::{CapabilitiesArgs, CapabilitiesCommand, GlobalOpts};
use crate::error::CliError;

use super::util;

pub async fn handle(
    client: &ApiClient,
    args: CapabilitiesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let flags = global.output_flags();
    let config = util::capability_config();

    match args.command {
        None => {
            let namespace = args.namespace.as_deref();
            let version = args.version;
            output_item_or_list(
                &flags,
                &config,
                args.id.as_deref(),
                true,
                || async { util::custom_capabilities(client, namespace).await },
                |id| async move {
                    client
                        .get_capability(&id, version)
                        .await
                        .map_err(CoreError::from)
                },
            )
            .await?;
            Ok(())
        }

        Some(CapabilitiesCommand::Create { input }) => {
            input_and_output_item(
                &input.flags(),
                &flags,
                input.dry_run,
                &config.list_table_field_definitions,
                |capability: Value| async move {
                    client
                        .create_capability(&capability)
                        .await
                        .map_err(CoreError::from)
                },
            )
            .await?;
            Ok(())
        }

        Some(CapabilitiesCommand::Update { id, version, input }) => {
            let mut prompter = DialoguerPrompter;
            let capability_id = util::choose_capability(
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
                |capability: Value| async move {
                    client
                        .update_capability(&capability_id, version, &capability)
                        .await
                        .map_err(CoreError::from)
                },
            )
            .await?;
            Ok(())
        }

        Some(CapabilitiesCommand::Delete { id, version }) => {
            let mut prompter = DialoguerPrompter;
            let capability_id = util::choose_capability(
                client,
                &mut prompter,
                id.as_deref(),
                ChooseOptions {
                    allow_index: true,
                    ..ChooseOptions::default()
                },
            )
            .await?;
            client.delete_capability(&capability_id, version).await?;
            println!("Capability {capability_id} deleted.");
            Ok(())
        }
    }
}
