//! SmartApp command handlers, including Lambda authorization.

use futures::future::try_join_all;
use stcli_api::ApiClient;
use stcli_api::lambda::{self, AwsLambdaApi, LambdaApi};
use stcli_api::types::AppRequest;
use stcli_core::io::{input_and_output_item, output_item_or_list};
use stcli_core::{ChooseOptions, CoreError, DialoguerPrompter};

use crate::cli::{AppsArgs, AppsCommand, GlobalOpts};
use crate::error::CliError;

use super::util;

/// Authorize every Lambda function of an app payload. Anything that isn't a
/// Lambda SmartApp is rejected before any other call is made.
pub async fn authorize_app_functions(
    lambda_api: &impl LambdaApi,
    app: &AppRequest,
) -> Result<(), CoreError> {
    if app.webhook_smart_app.is_some() {
        return Err(CoreError::Unsupported(
            "Authorization is not applicable to WebHook SmartApps".into(),
        ));
    }
    let Some(lambda_app) = &app.lambda_smart_app else {
        return Err(CoreError::Unsupported(
            "Authorization is only applicable to Lambda SmartApps.".into(),
        ));
    };
    try_join_all(
        lambda_app
            .functions
            .iter()
            .map(|arn| lambda::add_permission(lambda_api, arn, None, None)),
    )
    .await?;
    Ok(())
}

pub async fn handle(
    client: &ApiClient,
    args: AppsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let flags = global.output_flags();
    let config = util::app_config();

    match args.command {
        None => {
            output_item_or_list(
                &flags,
                &config,
                args.id.as_deref(),
                true,
                || async { client.list_apps().await.map_err(CoreError::from) },
                |id| async move { client.get_app(&id).await.map_err(CoreError::from) },
            )
            .await?;
            Ok(())
        }

        Some(AppsCommand::Create { input, authorize }) => {
            input_and_output_item(
                &input.flags(),
                &flags,
                input.dry_run,
                &config.list_table_field_definitions,
                |app: AppRequest| async move {
                    if authorize {
                        authorize_app_functions(&AwsLambdaApi, &app).await?;
                    }
                    client.create_app(&app).await.map_err(CoreError::from)
                },
            )
            .await?;
            Ok(())
        }

        Some(AppsCommand::Update {
            id,
            input,
            authorize,
        }) => {
            let mut prompter = DialoguerPrompter;
            let app_id = util::choose_app(
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
                |app: AppRequest| async move {
                    if authorize {
                        authorize_app_functions(&AwsLambdaApi, &app).await?;
                    }
                    client
                        .update_app(&app_id, &app)
                        .await
                        .map_err(CoreError::from)
                },
            )
            .await?;
            Ok(())
        }

        Some(AppsCommand::Delete { id }) => {
            let mut prompter = DialoguerPrompter;
            let app_id = util::choose_app(
                client,
                &mut prompter,
                id.as_deref(),
                ChooseOptions {
                    allow_index: true,
                    ..ChooseOptions::default()
                },
            )
            .await?;
            client.delete_app(&app_id).await?;
            println!("App {app_id} deleted.");
            Ok(())
        }

        Some(AppsCommand::Authorize {
            arn,
            principal,
            statement_id,
        }) => {
            let message = lambda::add_permission(
                &AwsLambdaApi,
                &arn,
                principal.as_deref(),
                statement_id.as_deref(),
            )
            .await
            .map_err(CliError::from)?;
            println!("{message}");
            Ok(())
        }
    }
}
