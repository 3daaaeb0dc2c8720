//! Rule command handlers.
//!
//! Rules live under a location. With `--location-id` everything is scoped
//! to that location; without it, listing and id resolution work against the
//! aggregate of all locations.

use serde_json::Value;
use stcli_api::ApiClient;
use stcli_core::io::{input_and_output_item, output_item, output_list};
use stcli_core::resolve::string_translate_to_id;
use stcli_core::{ChooseOptions, CoreError, DialoguerPrompter};

use crate::cli::{GlobalOpts, RulesArgs, RulesCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(
    client: &ApiClient,
    args: RulesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let flags = global.output_flags();
    let config = util::rule_config();
    let mut prompter = DialoguerPrompter;

    match args.command {
        None => {
            let rules = util::rules_with_locations(client, args.location_id.as_deref()).await?;

            if let Some(arg) = args.id.as_deref() {
                let rules_for_translate = rules.clone();
                let rule_id = string_translate_to_id(
                    Some(arg),
                    &config.primary_key_name,
                    &config.sort_key_name,
                    || async { Ok(rules_for_translate) },
                )
                .await?
                .ok_or_else(|| CoreError::NotFound(format!("rule {arg}")))?;

                let rule = rules
                    .iter()
                    .find(|r| r["id"].as_str() == Some(rule_id.as_str()))
                    .ok_or_else(|| CoreError::NotFound(format!("rule {rule_id}")))?;
                output_item(&flags, &config.list_table_field_definitions, rule)?;
            } else {
                output_list(&flags, &config, &rules, true, false)?;
            }
            Ok(())
        }

        Some(RulesCommand::Create { location_id, input }) => {
            let location_id = util::choose_location(
                client,
                &mut prompter,
                location_id.as_deref(),
                ChooseOptions {
                    allow_index: true,
                    auto_choose: true,
                },
            )
            .await?;
            input_and_output_item(
                &input.flags(),
                &flags,
                input.dry_run,
                &config.list_table_field_definitions,
                |rule: Value| async move {
                    client
                        .create_rule(&location_id, &rule)
                        .await
                        .map_err(CoreError::from)
                },
            )
            .await?;
            Ok(())
        }

        Some(RulesCommand::Update {
            id,
            location_id,
            input,
        }) => {
            let (rule_id, location_id) = util::choose_rule(
                client,
                &mut prompter,
                id.as_deref(),
                location_id.as_deref(),
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
                |rule: Value| async move {
                    client
                        .update_rule(&rule_id, &location_id, &rule)
                        .await
                        .map_err(CoreError::from)
                },
            )
            .await?;
            Ok(())
        }

        Some(RulesCommand::Delete { id, location_id }) => {
            let (rule_id, location_id) = util::choose_rule(
                client,
                &mut prompter,
                id.as_deref(),
                location_id.as_deref(),
                ChooseOptions {
                    allow_index: true,
                    ..ChooseOptions::default()
                },
            )
            .await?;
            client.delete_rule(&rule_id, &location_id).await?;
            println!("Rule {rule_id} deleted.");
            Ok(())
        }

        Some(RulesCommand::Execute { id, location_id }) => {
            let (rule_id, location_id) = util::choose_rule(
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
            let result = client.execute_rule(&rule_id, &location_id).await?;
            output_item(
                &flags,
                &[
                    stcli_core::TableFieldDefinition::labeled("executionId", "Execution Id"),
                    stcli_core::TableFieldDefinition::new("result"),
                ],
                &serde_json::to_value(&result)?,
            )?;
            Ok(())
        }
    }
}
