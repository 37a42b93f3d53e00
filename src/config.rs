use crate::error::{HeadshotError, Result};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_ASPECT_RATIO: &str = "1:1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const KEYSTORE_VAR: &str = "HEADSHOT_KEYSTORE";

/// How the three variation requests are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    #[default]
    Concurrent,
    Sequential,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub model: String,
    pub endpoint: String,
    pub aspect_ratio: String,
    pub timeout: Duration,
    pub dispatch: DispatchMode,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            dispatch: DispatchMode::default(),
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let model = env::var("GEMINI_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.model);
        let endpoint = env::var("GEMINI_ENDPOINT")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.endpoint);
        let timeout = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        GeminiConfig {
            model,
            endpoint,
            timeout,
            ..defaults
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_dispatch(mut self, dispatch: DispatchMode) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn sequential(self) -> Self {
        self.with_dispatch(DispatchMode::Sequential)
    }
}

/// Source of the Gemini API key. Resolved before any request is sent.
pub trait CredentialProvider: Send + Sync {
    fn resolve(&self) -> Result<String>;
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn missing_key() -> HeadshotError {
    HeadshotError::ConfigError(format!(
        "Missing Gemini API key. Set {} or store it in the key store under {}.",
        API_KEY_VAR, API_KEY_VAR
    ))
}

#[derive(Debug, Clone)]
pub struct StaticCredentials(String);

impl StaticCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self(api_key.into())
    }
}

impl CredentialProvider for StaticCredentials {
    fn resolve(&self) -> Result<String> {
        non_empty(Some(self.0.clone())).ok_or_else(missing_key)
    }
}

#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self {
            var: API_KEY_VAR.to_string(),
        }
    }
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvCredentials {
    fn resolve(&self) -> Result<String> {
        non_empty(env::var(&self.var).ok()).ok_or_else(missing_key)
    }
}

/// Flat JSON object of string keys to string values kept on local disk.
#[derive(Debug, Clone)]
pub struct KeyStoreCredentials {
    path: PathBuf,
    key: String,
}

impl KeyStoreCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: API_KEY_VAR.to_string(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// `$HEADSHOT_KEYSTORE`, falling back to `~/.headshotgen/keys.json`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = non_empty(env::var(KEYSTORE_VAR).ok()) {
            return Some(PathBuf::from(path));
        }
        env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join(".headshotgen")
                .join("keys.json")
        })
    }

    /// Writes `api_key` under this store's key. An unparseable store file is
    /// left untouched and reported as `SerializationError`.
    pub fn store(&self, api_key: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(self.key.clone(), api_key.trim().to_string());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }

    /// A missing file is an empty store.
    fn load(&self) -> Result<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl CredentialProvider for KeyStoreCredentials {
    fn resolve(&self) -> Result<String> {
        let value = match self.load() {
            Ok(mut entries) => entries.remove(&self.key),
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable key store {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        };
        non_empty(value).ok_or_else(missing_key)
    }
}

/// Tries each provider in order and returns the first key found.
#[derive(Default)]
pub struct ChainedCredentials {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl ChainedCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Environment variable first, then the local key store.
    pub fn standard() -> Self {
        let chain = Self::new().with_provider(EnvCredentials::default());
        match KeyStoreCredentials::default_path() {
            Some(path) => chain.with_provider(KeyStoreCredentials::new(path)),
            None => chain,
        }
    }
}

impl CredentialProvider for ChainedCredentials {
    fn resolve(&self) -> Result<String> {
        for provider in &self.providers {
            if let Ok(key) = provider.resolve() {
                return Ok(key);
            }
        }
        Err(missing_key())
    }
}
