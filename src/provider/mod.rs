//! Provider capability: pluggable text-generation backends.

pub mod openrouter;

use async_trait::async_trait;

use crate::config::GenerationConfig;
use crate::error::{ConfigError, ProviderError};
use crate::git::GitContext;
use crate::message::CommitMessage;

pub use openrouter::OpenRouterProvider;

/// Capability contract every provider satisfies.
#[async_trait]
pub trait ProviderPort: Send + Sync + std::fmt::Debug {
    /// Draft a commit message from the collected context.
    async fn generate_commit_message(
        &self,
        context: &GitContext,
        config: &GenerationConfig,
    ) -> Result<CommitMessage, ProviderError>;
}

type ProviderFactory = fn() -> Result<Box<dyn ProviderPort>, ConfigError>;

fn openrouter_factory() -> Result<Box<dyn ProviderPort>, ConfigError> {
    Ok(Box::new(OpenRouterProvider::new()))
}

fn openai_factory() -> Result<Box<dyn ProviderPort>, ConfigError> {
    Err(ConfigError::ProviderNotImplemented("openai".to_string()))
}

fn anthropic_factory() -> Result<Box<dyn ProviderPort>, ConfigError> {
    Err(ConfigError::ProviderNotImplemented("anthropic".to_string()))
}

/// Known providers, looked up by identifier.
const REGISTRY: &[(&str, ProviderFactory)] = &[
    ("openrouter", openrouter_factory),
    ("openai", openai_factory),
    ("anthropic", anthropic_factory),
];

/// Instantiate the provider configured by `provider_id`.
///
/// Unknown and unimplemented identifiers fail here, at configuration time,
/// before any network use.
pub fn create_provider(provider_id: &str) -> Result<Box<dyn ProviderPort>, ConfigError> {
    match REGISTRY.iter().find(|(id, _)| *id == provider_id) {
        Some((_, factory)) => factory(),
        None => Err(ConfigError::UnknownProvider(provider_id.to_string())),
    }
}

/// Environment variable consulted for a provider's API key.
pub fn api_key_env(provider_id: &str) -> Option<&'static str> {
    match provider_id {
        "openrouter" => Some("OPENROUTER_API_KEY"),
        "openai" => Some("OPENAI_API_KEY"),
        "anthropic" => Some("ANTHROPIC_API_KEY"),
        _ => None,
    }
}

/// Pre-flight check that a usable API key exists for the configured
/// provider, before any context collection or network work starts.
pub fn ensure_api_key(config: &GenerationConfig) -> Result<(), ConfigError> {
    if config.api_key.is_some() {
        return Ok(());
    }

    let env_var = match api_key_env(&config.provider) {
        Some(var) => var,
        None => return Err(ConfigError::UnknownProvider(config.provider.clone())),
    };

    match std::env::var(env_var) {
        Ok(value) if !value.is_empty() => Ok(()),
        _ => Err(ConfigError::MissingApiKey {
            provider: config.provider.clone(),
            env_var: env_var.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn unknown_provider_is_a_config_error() {
        let err = create_provider("foo").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProvider(id) if id == "foo"));
    }

    #[test]
    fn unimplemented_providers_fail_closed() {
        assert!(matches!(
            create_provider("openai").unwrap_err(),
            ConfigError::ProviderNotImplemented(id) if id == "openai"
        ));
        assert!(matches!(
            create_provider("anthropic").unwrap_err(),
            ConfigError::ProviderNotImplemented(id) if id == "anthropic"
        ));
    }

    #[test]
    fn openrouter_is_implemented() {
        assert!(create_provider("openrouter").is_ok());
    }

    #[test]
    fn api_key_env_maps_known_providers() {
        assert_eq!(api_key_env("openrouter"), Some("OPENROUTER_API_KEY"));
        assert_eq!(api_key_env("openai"), Some("OPENAI_API_KEY"));
        assert_eq!(api_key_env("anthropic"), Some("ANTHROPIC_API_KEY"));
        assert_eq!(api_key_env("foo"), None);
    }

    #[test]
    fn explicit_key_satisfies_preflight() {
        let config = GenerationConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        assert!(ensure_api_key(&config).is_ok());
    }

    #[test]
    #[serial]
    fn env_key_satisfies_preflight() {
        temp_env::with_var("OPENROUTER_API_KEY", Some("sk-env"), || {
            assert!(ensure_api_key(&GenerationConfig::default()).is_ok());
        });
    }

    #[test]
    #[serial]
    fn missing_key_fails_preflight() {
        temp_env::with_var_unset("OPENROUTER_API_KEY", || {
            let err = ensure_api_key(&GenerationConfig::default()).unwrap_err();
            assert!(matches!(err, ConfigError::MissingApiKey { .. }));
        });
    }

    #[test]
    #[serial]
    fn empty_env_key_fails_preflight() {
        temp_env::with_var("OPENROUTER_API_KEY", Some(""), || {
            let err = ensure_api_key(&GenerationConfig::default()).unwrap_err();
            assert!(matches!(err, ConfigError::MissingApiKey { .. }));
        });
    }
}
