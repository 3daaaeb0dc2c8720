//! ST Schema connector command handlers.

use futures::future::try_join_all;
use stcli_api::ApiClient;
use stcli_api::lambda::{self, LambdaApi};
use stcli_api::types::SchemaApp;
use stcli_core::io::{input_and_output_item, output_item_or_list};
use stcli_core::{ChooseOptions, CoreError, DialoguerPrompter};

use crate::cli::{GlobalOpts, SchemaArgs, SchemaCommand};
use crate::error::CliError;

use super::util;

/// Authorize every configured Lambda ARN of a connector payload. Only
/// Lambda-hosted connectors can be authorized.
pub async fn authorize_schema_functions(
    lambda_api: &impl LambdaApi,
    app: &SchemaApp,
) -> Result<(), CoreError> {
    if app.hosting_type.as_deref() != Some("lambda") {
        return Err(CoreError::Unsupported(
            "Authorization is not applicable to WebHook schema connectors".into(),
        ));
    }
    try_join_all(
        app.lambda_arns()
            .into_iter()
            .map(|arn| lambda::add_schema_permission(lambda_api, arn)),
    )
    .await?;
    Ok(())
}

pub async fn handle(
    client: &ApiClient,
    args: SchemaArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let flags = global.output_flags();
    let config = util::schema_config();

    match args.command {
        None => {
            output_item_or_list(
                &flags,
                &config,
                args.id.as_deref(),
                true,
                || async { client.list_schema_apps().await.map_err(CoreError::from) },
                |id| async move { client.get_schema_app(&id).await.map_err(CoreError::from) },
            )
            .await?;
            Ok(())
        }

        Some(SchemaCommand::Create { input, authorize }) => {
            input_and_output_item(
                &input.flags(),
                &flags,
                input.dry_run,
                &config.list_table_field_definitions,
                |app: SchemaApp| async move {
                    if authorize {
                        authorize_schema_functions(&lambda::AwsLambdaApi, &app).await?;
                    }
                    client.create_schema_app(&app).await.map_err(CoreError::from)
                },
            )
            .await?;
            Ok(())
        }

        Some(SchemaCommand::Update {
            id,
            input,
            authorize,
        }) => {
            let mut prompter = DialoguerPrompter;
            let endpoint_app_id = util::choose_schema_app(
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
                |app: SchemaApp| async move {
                    if authorize {
                        authorize_schema_functions(&lambda::AwsLambdaApi, &app).await?;
                    }
                    client
                        .update_schema_app(&endpoint_app_id, &app)
                        .await
                        .map_err(CoreError::from)
                },
            )
            .await?;
            Ok(())
        }

        Some(SchemaCommand::Delete { id }) => {
            let mut prompter = DialoguerPrompter;
            let endpoint_app_id = util::choose_schema_app(
                client,
                &mut prompter,
                id.as_deref(),
                ChooseOptions {
                    allow_index: true,
                    ..ChooseOptions::default()
                },
            )
            .await?;
            client.delete_schema_app(&endpoint_app_id).await?;
            println!("Schema connector {endpoint_app_id} deleted.");
            Ok(())
        }
    }
}
