use thiserror::Error;

/// Error type shared by the interaction framework and command handlers.
///
/// Remote API errors pass through unmodified; everything else is a user
/// input or IO problem local to this invocation.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── User input ──────────────────────────────────────────────────
    #[error("invalid index {index} (enter an id or index between 1 and {max} inclusive)")]
    InvalidIndex { index: usize, max: usize },

    #[error("did not find key {key} in data")]
    MissingKey { key: String },

    #[error("invalid type for primary key {key} in {item}")]
    InvalidKeyType { key: String, item: String },

    #[error("input is required either via file specified with --input option or from stdin")]
    MissingInput,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Operation rejected for this kind of item; the message is shown
    /// verbatim.
    #[error("{0}")]
    Unsupported(String),

    // ── Resolution ──────────────────────────────────────────────────
    #[error("could not find {0}")]
    NotFound(String),

    // ── Interaction ─────────────────────────────────────────────────
    #[error("user canceled request")]
    Cancelled,

    // ── Collaborators ───────────────────────────────────────────────
    /// Remote API error, propagated unmodified.
    #[error(transparent)]
    Api(#[from] stcli_api::Error),

    #[error(transparent)]
    Lambda(#[from] stcli_api::lambda::LambdaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
