//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and API errors into user-facing errors with actionable
//! help text and exit codes.

use miette::Diagnostic;
use stcli_core::CoreError;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CANCELLED: i32 = 5;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication / configuration ──────────────────────────────

    #[error("No access token configured for profile '{profile}'")]
    #[diagnostic(
        code(stcli::no_token),
        help(
            "Set the SMARTTHINGS_TOKEN environment variable or add a token to\n\
             the profile in {config_path}.\n\
             Tokens can be created at https://account.smartthings.com/tokens"
        )
    )]
    MissingToken {
        profile: String,
        config_path: String,
    },

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(stcli::auth_failed),
        help("Check that the token is valid and has the required scopes.")
    )]
    AuthFailed { message: String },

    #[error(transparent)]
    #[diagnostic(code(stcli::config))]
    Config(Box<figment::Error>),

    // ── User input ──────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(stcli::validation))]
    Validation { field: String, reason: String },

    #[error("{0}")]
    #[diagnostic(code(stcli::input))]
    Input(String),

    // ── Resources ───────────────────────────────────────────────────

    #[error("could not find {name}")]
    #[diagnostic(code(stcli::not_found))]
    NotFound { name: String },

    // ── Interaction ─────────────────────────────────────────────────

    #[error("user canceled request")]
    #[diagnostic(code(stcli::cancelled))]
    Cancelled,

    // ── Remote ──────────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(stcli::api))]
    Api(stcli_api::Error),

    #[error(transparent)]
    #[diagnostic(code(stcli::lambda))]
    Lambda(stcli_api::lambda::LambdaError),

    // ── IO / Serialization ──────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(stcli::json), help("Check the input contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<stcli_api::Error> for CliError {
    fn from(err: stcli_api::Error) -> Self {
        match err {
            stcli_api::Error::Authentication { message } => Self::AuthFailed { message },
            other => Self::Api(other),
        }
    }
}

impl From<stcli_api::lambda::LambdaError> for CliError {
    fn from(err: stcli_api::lambda::LambdaError) -> Self {
        Self::Lambda(err)
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(name) => Self::NotFound { name },
            CoreError::Cancelled => Self::Cancelled,
            CoreError::Api(api) => Self::from(api),
            CoreError::Lambda(lambda) => Self::Lambda(lambda),
            CoreError::Io(io) => Self::Io(io),
            CoreError::Serialization(json) => Self::Json(json),
            // Index, key, and input errors carry their own exact wording.
            other => Self::Input(other.to_string()),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingToken { .. } | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Cancelled => exit_code::CANCELLED,
            Self::Validation { .. } | Self::Input(_) => exit_code::USAGE,
            Self::Api(err) if err.is_not_found() => exit_code::NOT_FOUND,
            _ => exit_code::GENERAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_category() {
        let err = CliError::MissingToken {
            profile: "default".into(),
            config_path: "/tmp/config.toml".into(),
        };
        assert_eq!(err.exit_code(), exit_code::AUTH);

        assert_eq!(CliError::Cancelled.exit_code(), exit_code::CANCELLED);
        assert_eq!(
            CliError::NotFound { name: "device".into() }.exit_code(),
            exit_code::NOT_FOUND
        );
        assert_eq!(
            CliError::Input("invalid index 4".into()).exit_code(),
            exit_code::USAGE
        );
    }

    #[test]
    fn core_errors_keep_their_wording() {
        let err = CliError::from(CoreError::MissingInput);
        assert_eq!(
            err.to_string(),
            "input is required either via file specified with --input option or from stdin"
        );
        let err = CliError::from(CoreError::NotFound("device".into()));
        assert_eq!(err.to_string(), "could not find device");
    }
}
