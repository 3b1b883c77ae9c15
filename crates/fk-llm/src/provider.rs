//! Provider selection: an ordered fallback chain over the capability traits.
//!
//! Backends are tried in a fixed preference order and the first one that can
//! be constructed wins. The offline [`LocalGenerator`] is always available
//! as the final fallback, so selection never fails.

use std::env;
use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::capability::{CaseGenerator, TextGenerator};
use crate::chat::{ChatConfig, ChatProvider};
use crate::local::LocalGenerator;

const QWEN_BASE_URL: &str = "https://dashscope-intl.aliyuncs.com/compatible-mode/v1";
const QWEN_MODEL: &str = "qwen-plus";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_MODEL: &str = "gpt-4o-mini";
const LOCAL_MODEL: &str = "phi3:mini";

/// Which backend the chain settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Qwen/DashScope via the OpenAI-compatible endpoint.
    Qwen,
    /// OpenAI.
    OpenAi,
    /// A keyless local HTTP endpoint (Ollama, vLLM, ...).
    LocalHttp,
    /// The deterministic offline generator.
    Offline,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Qwen => write!(f, "qwen"),
            Self::OpenAi => write!(f, "openai"),
            Self::LocalHttp => write!(f, "local-http"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// The selected generation capabilities, shared by the engine policies.
#[derive(Clone)]
pub struct Capabilities {
    /// Which backend was selected.
    pub backend: Backend,
    /// Free-form text generation (replies, scoring).
    pub text: Arc<dyn TextGenerator>,
    /// Structured case generation.
    pub cases: Arc<dyn CaseGenerator>,
}

/// Raw provider settings, usually read from the environment.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    /// Qwen/DashScope API key.
    pub qwen_key: Option<String>,
    /// Override for the Qwen endpoint.
    pub qwen_base_url: Option<String>,
    /// Override for the Qwen model name.
    pub qwen_model: Option<String>,
    /// OpenAI API key.
    pub openai_key: Option<String>,
    /// Override for the OpenAI model name.
    pub openai_model: Option<String>,
    /// Base URL of a keyless local endpoint.
    pub local_url: Option<String>,
    /// Model name on the local endpoint.
    pub local_model: Option<String>,
    /// Seed for the offline fallback generator.
    pub seed: u64,
}

impl ProviderSettings {
    /// Read settings from the process environment.
    ///
    /// Recognized variables: `DASHSCOPE_API_KEY`/`QWEN_API_KEY` (+
    /// `QWEN_BASE_URL`/`DASHSCOPE_BASE_URL`, `QWEN_MODEL`),
    /// `OPENAI_API_KEY` (+ `OPENAI_MODEL`), `LOCAL_LLM_BASE_URL`
    /// (+ `LOCAL_LLM_MODEL`).
    pub fn from_env(seed: u64) -> Self {
        Self {
            qwen_key: env_nonempty("DASHSCOPE_API_KEY").or_else(|| env_nonempty("QWEN_API_KEY")),
            qwen_base_url: env_nonempty("QWEN_BASE_URL")
                .or_else(|| env_nonempty("DASHSCOPE_BASE_URL")),
            qwen_model: env_nonempty("QWEN_MODEL"),
            openai_key: env_nonempty("OPENAI_API_KEY"),
            openai_model: env_nonempty("OPENAI_MODEL"),
            local_url: env_nonempty("LOCAL_LLM_BASE_URL"),
            local_model: env_nonempty("LOCAL_LLM_MODEL"),
            seed,
        }
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn chat_capabilities(backend: Backend, config: ChatConfig) -> Option<Capabilities> {
    match ChatProvider::new(config) {
        Ok(provider) => {
            let provider = Arc::new(provider);
            info!(%backend, model = provider.model(), "using chat provider");
            Some(Capabilities {
                backend,
                text: provider.clone(),
                cases: provider,
            })
        }
        Err(e) => {
            warn!(%backend, error = %e, "provider unavailable, trying next");
            None
        }
    }
}

/// Select capabilities from explicit settings.
///
/// Preference order: Qwen, OpenAI, local HTTP endpoint, offline generator.
pub fn capabilities_from(settings: ProviderSettings) -> Capabilities {
    if let Some(key) = settings.qwen_key {
        let base = settings
            .qwen_base_url
            .unwrap_or_else(|| QWEN_BASE_URL.to_string());
        let model = settings.qwen_model.unwrap_or_else(|| QWEN_MODEL.to_string());
        if let Some(caps) =
            chat_capabilities(Backend::Qwen, ChatConfig::new(base, model).with_api_key(key))
        {
            return caps;
        }
    }

    if let Some(key) = settings.openai_key {
        let model = settings
            .openai_model
            .unwrap_or_else(|| OPENAI_MODEL.to_string());
        if let Some(caps) = chat_capabilities(
            Backend::OpenAi,
            ChatConfig::new(OPENAI_BASE_URL, model).with_api_key(key),
        ) {
            return caps;
        }
    }

    if let Some(url) = settings.local_url {
        let model = settings
            .local_model
            .unwrap_or_else(|| LOCAL_MODEL.to_string());
        if let Some(caps) = chat_capabilities(Backend::LocalHttp, ChatConfig::new(url, model)) {
            return caps;
        }
    }

    info!("no chat provider configured, using offline generator");
    let local = Arc::new(LocalGenerator::new(settings.seed));
    Capabilities {
        backend: Backend::Offline,
        text: local.clone(),
        cases: local,
    }
}

/// Select capabilities from the process environment.
pub fn capabilities_from_env(seed: u64) -> Capabilities {
    capabilities_from(ProviderSettings::from_env(seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_select_offline() {
        let caps = capabilities_from(ProviderSettings::default());
        assert_eq!(caps.backend, Backend::Offline);
    }

    #[test]
    fn qwen_key_selects_qwen() {
        let caps = capabilities_from(ProviderSettings {
            qwen_key: Some("key".to_string()),
            ..ProviderSettings::default()
        });
        assert_eq!(caps.backend, Backend::Qwen);
    }

    #[test]
    fn qwen_outranks_openai() {
        let caps = capabilities_from(ProviderSettings {
            qwen_key: Some("key".to_string()),
            openai_key: Some("other".to_string()),
            ..ProviderSettings::default()
        });
        assert_eq!(caps.backend, Backend::Qwen);
    }

    #[test]
    fn local_url_outranks_offline() {
        let caps = capabilities_from(ProviderSettings {
            local_url: Some("http://127.0.0.1:11434/v1".to_string()),
            ..ProviderSettings::default()
        });
        assert_eq!(caps.backend, Backend::LocalHttp);
    }
}
