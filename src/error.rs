//! Error types for quill modules using thiserror.

use thiserror::Error;

/// Errors from configuration and pre-flight validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown AI provider: {0}")]
    UnknownProvider(String),

    #[error("{0} provider not yet implemented")]
    ProviderNotImplemented(String),

    #[error(
        "API key required for {provider}. Set the {env_var} environment variable or configure apiKey in settings."
    )]
    MissingApiKey { provider: String, env_var: String },
}

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found. Install git and make sure it is on PATH.")]
    NotInstalled,

    #[error("Not in a git repository")]
    NotARepository,

    #[error("No staged changes found. Stage your changes first with `git add`.")]
    NoStagedChanges,

    #[error("Failed to spawn git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git {operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },

    #[error("git commit exited with code {code}")]
    CommitFailed { code: i32 },
}

/// Rejections of a provider reply's content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    #[error("Empty response from AI provider")]
    Empty,

    #[error("AI response too long ({len} bytes, limit {limit}), possible error")]
    TooLong { len: usize, limit: usize },
}

/// Errors from the remote model provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error(
        "{provider} API key not found. Set the {env_var} environment variable or configure in settings."
    )]
    KeyNotFound { provider: String, env_var: String },

    #[error("Failed to reach {provider} API: {source}")]
    Request {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API error: {status} {body}")]
    Api {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {0} API")]
    InvalidResponse(String),

    #[error(transparent)]
    InvalidReply(#[from] ResponseError),
}

/// Top-level error surfaced at the CLI boundary.
///
/// Domain errors keep their kind so the CLI can render each distinctly;
/// everything else lands in `Unexpected`.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}
