//! AWS Lambda invoke-permission side channel.
//!
//! Lambda-hosted apps and schema connectors need the platform's AWS account
//! authorized to invoke their functions. The actual AWS call sits behind the
//! [`LambdaApi`] trait so command logic (and tests) never touch the real SDK
//! directly; [`AwsLambdaApi`] is the production implementation.

use thiserror::Error;

/// AWS account id the platform invokes SmartApp Lambdas from.
pub const SMART_APP_PRINCIPAL: &str = "906037444270";

/// AWS account id used for schema connector invocations.
pub const SCHEMA_AWS_PRINCIPAL: &str = "148790070172";

const DEFAULT_STATEMENT_ID: &str = "smartthings";

/// Failure modes of an add-permission call.
///
/// `ResourceConflict` is the one remote error with benign meaning (the
/// permission already exists); everything else propagates.
#[derive(Debug, Error)]
pub enum LambdaError {
    #[error("permission statement already exists")]
    ResourceConflict,

    #[error("Lambda call failed: {0}")]
    Other(String),
}

/// Parameters for one `AddPermission` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddPermissionRequest {
    pub function_arn: String,
    pub region: String,
    pub principal: String,
    pub statement_id: String,
}

/// Seam for the AWS Lambda `AddPermission` operation.
pub trait LambdaApi {
    fn add_permission(
        &self,
        request: &AddPermissionRequest,
    ) -> impl Future<Output = Result<(), LambdaError>> + Send;
}

/// Production implementation backed by `aws-sdk-lambda`.
///
/// Credentials come from the standard AWS environment/profile chain; the
/// region is taken from the request (parsed out of the function ARN).
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsLambdaApi;

impl LambdaApi for AwsLambdaApi {
    async fn add_permission(&self, request: &AddPermissionRequest) -> Result<(), LambdaError> {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(request.region.clone()))
            .load()
            .await;
        let client = aws_sdk_lambda::Client::new(&config);

        let result = client
            .add_permission()
            .action("lambda:InvokeFunction")
            .function_name(&request.function_arn)
            .principal(&request.principal)
            .statement_id(&request.statement_id)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sdk_err) => match sdk_err.into_service_error() {
                aws_sdk_lambda::operation::add_permission::AddPermissionError::ResourceConflictException(_) => {
                    Err(LambdaError::ResourceConflict)
                }
                other => Err(LambdaError::Other(other.to_string())),
            },
        }
    }
}

/// Grant the platform permission to invoke `function_arn`.
///
/// Returns a human-readable status string: `"Authorization added"` on
/// success, `"Already authorized"` when the permission statement already
/// exists, and `"Invalid Lambda ARN"` (without any AWS call) when the ARN
/// is malformed. Any other AWS failure propagates.
pub async fn add_permission(
    api: &impl LambdaApi,
    function_arn: &str,
    principal: Option<&str>,
    statement_id: Option<&str>,
) -> Result<String, LambdaError> {
    let segments: Vec<&str> = function_arn.split(':').collect();
    if segments.len() < 7 {
        return Ok("Invalid Lambda ARN".to_owned());
    }

    let request = AddPermissionRequest {
        function_arn: function_arn.to_owned(),
        region: segments[3].to_owned(),
        principal: principal.unwrap_or(SMART_APP_PRINCIPAL).to_owned(),
        statement_id: statement_id.unwrap_or(DEFAULT_STATEMENT_ID).to_owned(),
    };

    match api.add_permission(&request).await {
        Ok(()) => Ok("Authorization added".to_owned()),
        Err(LambdaError::ResourceConflict) => Ok("Already authorized".to_owned()),
        Err(other) => Err(other),
    }
}

/// Authorize a schema connector's Lambda function.
pub async fn add_schema_permission(
    api: &impl LambdaApi,
    function_arn: &str,
) -> Result<String, LambdaError> {
    add_permission(api, function_arn, Some(SCHEMA_AWS_PRINCIPAL), None).await
}
