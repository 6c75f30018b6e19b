use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Built-in provider presets, keyed by provider name.
pub static PROVIDER_PRESETS: Lazy<HashMap<&'static str, ProviderPreset>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert(
        "openrouter",
        ProviderPreset {
            base_url: "https://openrouter.ai/api/v1",
            default_model: "openai/gpt-4o-mini",
            api_key_env: "OPENROUTER_API_KEY",
        },
    );

    map.insert(
        "openai",
        ProviderPreset {
            base_url: "https://api.openai.com/v1",
            default_model: "gpt-4o-mini",
            api_key_env: "OPENAI_API_KEY",
        },
    );

    map
});

#[derive(Debug, Clone, Copy)]
pub struct ProviderPreset {
    pub base_url: &'static str,
    pub default_model: &'static str,
    pub api_key_env: &'static str,
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Assistant backend settings
    pub provider: ProviderConfig,

    /// Upper bound on how long one reply may stay in flight, in seconds
    pub reply_timeout_secs: u64,

    /// RoleArc home directory
    pub rolearc_home: PathBuf,

    /// UI preferences
    pub ui: UiConfig,
}

/// Assistant backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Preset name ("openrouter", "openai")
    pub name: String,
    pub base_url: String,
    pub model: String,
    /// API key stored in the config file; the preset's env var takes over
    /// when this is absent
    pub api_key: Option<String>,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub theme: String,
    pub show_typing_indicator: bool,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
        let rolearc_home = home.join(".rolearc");

        let preset = PROVIDER_PRESETS["openrouter"];

        Config {
            provider: ProviderConfig {
                name: "openrouter".to_string(),
                base_url: preset.base_url.to_string(),
                model: preset.default_model.to_string(),
                api_key: None,
            },
            reply_timeout_secs: 30,
            rolearc_home,
            ui: UiConfig {
                theme: "dark".to_string(),
                show_typing_indicator: true,
            },
        }
    }
}

impl Config {
    /// Load configuration from `~/.rolearc/config.toml`, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        let rolearc_home = home.join(".rolearc");
        let config_path = rolearc_home.join("config.toml");

        fs::create_dir_all(&rolearc_home).context("Failed to create .rolearc directory")?;

        let mut config = if config_path.exists() {
            let content =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            Config::default()
        };

        config.rolearc_home = rolearc_home;

        Ok(config)
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let config_path = self.rolearc_home.join("config.toml");
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content).context("Failed to write config file")?;
        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.rolearc_home.join("config.toml")
    }

    pub fn log_path(&self) -> PathBuf {
        self.rolearc_home.join("rolearc.log")
    }

    /// Check if an API key is available for the configured provider
    pub fn has_api_key(&self) -> bool {
        self.get_api_key().is_some()
    }

    /// Get the API key from config or the preset's environment variable
    pub fn get_api_key(&self) -> Option<String> {
        self.provider.api_key.clone().or_else(|| {
            PROVIDER_PRESETS
                .get(self.provider.name.as_str())
                .and_then(|preset| std::env::var(preset.api_key_env).ok())
        })
    }
}
