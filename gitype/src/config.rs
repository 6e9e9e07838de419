use axum::http::{HeaderMap, HeaderName, HeaderValue, Method};
use axum::routing::MethodFilter;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{GitypeError, Result};

/// 程序本身的配置，与数据目录中的 config.yaml 无关
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub data_dir: PathBuf,
    /// 附加到所有响应中的报头
    pub headers: HashMap<String, String>,
    pub log: LogConfig,
    pub watcher: WatcherSettings,
    pub webhook: WebhookConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data_dir: PathBuf::from("./data"),
            headers: HashMap::new(),
            log: LogConfig::default(),
            watcher: WatcherSettings::default(),
            webhook: WebhookConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// 未设置 RUST_LOG 时使用的过滤规则
    pub level: String,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherSettings {
    pub enabled: bool,
    pub interval_ms: u64,
    pub debounce_ms: u64,
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 1000,
            debounce_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub enabled: bool,
    pub url: String,
    pub method: String,
    /// 两次更新之间的最小间隔，单位为秒
    pub frequency_secs: u64,
    /// 数据目录不存在时从该仓库克隆
    pub repo_url: Option<String>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "/webhooks".to_string(),
            method: "POST".to_string(),
            frequency_secs: 60,
            repo_url: None,
        }
    }
}

impl WebhookConfig {
    pub fn frequency(&self) -> Duration {
        Duration::from_secs(self.frequency_secs)
    }

    pub fn method_filter(&self) -> Result<MethodFilter> {
        let method = Method::from_bytes(self.method.to_uppercase().as_bytes())
            .map_err(|_| GitypeError::Validation(format!("invalid webhook method: {}", self.method)))?;
        MethodFilter::try_from(method)
            .map_err(|e| GitypeError::Validation(format!("unsupported webhook method {}: {}", self.method, e)))
    }
}

impl Config {
    pub fn load() -> std::result::Result<Self, config::ConfigError> {
        // .env 中的变量与系统环境变量一样通过 GITYPE__ 前缀读取
        let _ = dotenv::dotenv();

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("gitype.toml").required(false));
        if let Some(home_dir) = dirs::home_dir() {
            let config_path = home_dir.join(".gitype").join("gitype.toml");
            builder = builder.add_source(config::File::from(config_path.as_path()).required(false));
        }
        let config = builder
            .add_source(config::Environment::with_prefix("GITYPE").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn validate(&self) -> Result<()> {
        if self.watcher.enabled && self.watcher.interval_ms == 0 {
            return Err(GitypeError::Validation(
                "watcher.interval_ms must be greater than zero".to_string(),
            ));
        }
        // etag 精确到秒，两次重新加载的间隔不能小于 1 秒
        if self.watcher.enabled && self.watcher.debounce_ms < 1000 {
            return Err(GitypeError::Validation(format!(
                "watcher.debounce_ms must be at least 1000: {}",
                self.watcher.debounce_ms
            )));
        }

        if self.webhook.enabled {
            if !self.webhook.url.starts_with('/') {
                return Err(GitypeError::Validation(format!(
                    "webhook.url must start with /: {}",
                    self.webhook.url
                )));
            }
            if self.webhook.frequency_secs == 0 {
                return Err(GitypeError::Validation(
                    "webhook.frequency_secs must be greater than zero".to_string(),
                ));
            }
            self.webhook.method_filter()?;
        }

        self.header_map().map(|_| ())
    }

    /// 将 headers 转换为 HeaderMap
    pub fn header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| GitypeError::Validation(format!("invalid header name: {}", name)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| GitypeError::Validation(format!("invalid value of header {}", name)))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}
