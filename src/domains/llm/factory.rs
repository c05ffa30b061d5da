//! Provider factory - maps a backend identifier to a concrete adapter.

use std::sync::Arc;
use tracing::info;

use super::{LlmError, LlmProvider, LlmResult, OllamaProvider, OpenAiProvider};
use crate::core::config::{LlmConfig, LlmProviderKind};

/// Build the provider declared by `config`.
///
/// Identifiers without an adapter fail here rather than on first use.
pub fn create_provider(config: &LlmConfig) -> LlmResult<Arc<dyn LlmProvider>> {
    let provider: Arc<dyn LlmProvider> = match config.provider {
        LlmProviderKind::OpenAi => Arc::new(OpenAiProvider::new(config)?),
        LlmProviderKind::Ollama => Arc::new(OllamaProvider::new(config)?),
        kind @ (LlmProviderKind::Anthropic | LlmProviderKind::Custom) => {
            return Err(LlmError::UnsupportedProvider(kind));
        }
    };

    info!(
        "LLM provider created: {} ({})",
        provider.name(),
        provider.model()
    );
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_openai() {
        let provider = create_provider(&LlmConfig::openai("sk-test")).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-3.5-turbo");
    }

    #[test]
    fn test_creates_ollama() {
        let provider =
            create_provider(&LlmConfig::ollama("http://localhost:11434", "mistral")).unwrap();
        assert_eq!(provider.name(), "ollama");
        assert_eq!(provider.model(), "mistral");
    }

    #[test]
    fn test_unsupported_providers_fail_fast() {
        for kind in [LlmProviderKind::Anthropic, LlmProviderKind::Custom] {
            let err = create_provider(&LlmConfig::new(kind)).err().unwrap();
            assert!(matches!(err, LlmError::UnsupportedProvider(k) if k == kind));
            assert!(!err.is_generation_failure());
        }
    }
}
