//! src/config.rs

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::analyzers::ai::AiAnalysisOptions;
use crate::analyzers::{AnalysisOptions, WorldviewThresholds};
use crate::llm::GenerationParams;

pub const APP_NAME: &str = "stylemate";
pub const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "STYLEMATE";
const API_KEY_FALLBACK_ENV: &str = "DEEPSEEK_API_KEY";

/// Returns the configuration directory path (~/.config/stylemate).
pub async fn get_config_dir() -> Result<PathBuf> {
    let config_dir = if cfg!(windows) {
        // Windows: %APPDATA%\stylemate
        dirs::data_dir()
            .map(|p| p.join(APP_NAME))
            .context("Could not get data directory")?
    } else {
        // Linux/macOS: ~/.config/stylemate
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .context("Could not get config directory")?
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .await
            .context("Could not create config directory")?;
    }
    Ok(config_dir)
}

/// Represents the main configuration for the application.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Chat-completions endpoint and generation settings.
    pub llm: LlmConfig,
    /// Tunables of the style analysis.
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: String,
    /// OpenAI 兼容接口的基础地址，请求发往 `{api_base}/chat/completions`。
    pub api_base: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    /// 关闭后写作时不附带文风描述。
    pub enable_style_transfer: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: "https://api.deepseek.com/v1".to_string(),
            model: "deepseek-chat".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            timeout_secs: 120,
            enable_style_transfer: true,
        }
    }
}

impl LlmConfig {
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub top_keywords: usize,
    pub top_phrases: usize,
    pub ai_char_budget: usize,
    pub ai_temperature: f64,
    pub ai_max_tokens: u32,
    pub life_attitude_ratio: f64,
    pub value_orientation_ratio: f64,
    pub time_orientation_ratio: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let ai = AiAnalysisOptions::default();
        let thresholds = WorldviewThresholds::default();
        Self {
            top_keywords: 20,
            top_phrases: 10,
            ai_char_budget: ai.char_budget,
            ai_temperature: ai.temperature,
            ai_max_tokens: ai.max_tokens,
            life_attitude_ratio: thresholds.life_attitude_ratio,
            value_orientation_ratio: thresholds.value_orientation_ratio,
            time_orientation_ratio: thresholds.time_orientation_ratio,
        }
    }
}

impl AnalysisConfig {
    pub fn options(&self) -> AnalysisOptions {
        AnalysisOptions {
            top_keywords: self.top_keywords,
            top_phrases: self.top_phrases,
            thresholds: WorldviewThresholds {
                life_attitude_ratio: self.life_attitude_ratio,
                value_orientation_ratio: self.value_orientation_ratio,
                time_orientation_ratio: self.time_orientation_ratio,
            },
        }
    }

    pub fn ai_options(&self) -> AiAnalysisOptions {
        AiAnalysisOptions {
            char_budget: self.ai_char_budget,
            temperature: self.ai_temperature,
            max_tokens: self.ai_max_tokens,
            top_keywords: self.top_keywords,
            top_phrases: self.top_phrases,
        }
    }
}

pub async fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir().await?.join(CONFIG_FILE))
}

/// 把配置写回 config.toml。
pub async fn save_config(config: &Config) -> Result<PathBuf> {
    let config_path = get_config_path().await?;
    let config_content = toml::to_string_pretty(config)?;
    let mut file = fs::File::create(&config_path).await?;
    file.write_all(config_content.as_bytes()).await?;
    Ok(config_path)
}

/// Writes the default configuration file.
pub async fn create_default_config() -> Result<PathBuf> {
    save_config(&Config::default()).await
}

/// 依次叠加默认值、config.toml 和 `STYLEMATE_` 开头的环境变量。
/// 没有配置 API Key 时回退到 `DEEPSEEK_API_KEY`。
pub async fn load_config() -> Result<Config> {
    let config_path = get_config_path().await?;
    debug!("读取配置文件: {:?}", config_path);

    let mut config: Config = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Could not read config file")?
        .try_deserialize()
        .context("Could not parse config file")?;

    if config.llm.api_key.trim().is_empty() {
        if let Ok(key) = env::var(API_KEY_FALLBACK_ENV) {
            config.llm.api_key = key;
        }
    }
    Ok(config)
}

/// 只读取 config.toml，不叠加环境变量，用于改写配置文件。
pub async fn load_file_config() -> Result<Config> {
    let config_path = get_config_path().await?;
    if !config_path.exists() {
        return Ok(Config::default());
    }
    let config_content = fs::read_to_string(&config_path)
        .await
        .context("Could not read config file")?;
    toml::from_str(&config_content).context("Could not parse config file")
}

/// DeepSeek 的 API Key 以 `sk-` 开头。
pub fn validate_api_key(api_key: &str) -> bool {
    api_key.starts_with("sk-") && api_key.chars().count() > 20
}

/// 脱敏显示 API Key：保留前 7 位和后 4 位。
pub fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() < 10 {
        return api_key.to_string();
    }
    let start: String = chars[..7].iter().collect();
    let end: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", start, end)
}
