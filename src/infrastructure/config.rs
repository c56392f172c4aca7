//! 配置基础设施
//!
//! 加载顺序：默认值 → 配置文件 (TOML) → 环境变量 `PORT`。

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::state::DEFAULT_SERVER_NAME;

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "DEMO_API_CONFIG";

/// 覆盖监听端口的环境变量
pub const PORT_ENV: &str = "PORT";

/// 应用配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 服务标识配置
    pub service: ServiceConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)，`RUST_LOG` 优先
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// 统计接口返回的 `server` 字段
    pub server_name: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
        }
    }
}

impl HttpConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl AppConfig {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 用 `PORT` 的值覆盖端口，空值忽略
    pub fn apply_port_override(&mut self, port: Option<&str>) -> Result<(), ConfigError> {
        let Some(port) = port.map(str::trim).filter(|p| !p.is_empty()) else {
            return Ok(());
        };

        self.http.port = port
            .parse()
            .map_err(|_| ConfigError::Validation(format!("无效的端口: {port}")))?;
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.service.server_name.is_empty() {
            return Err(ConfigError::Validation("服务器名称不能为空".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 加载并验证配置
///
/// 返回配置以及实际使用的配置文件路径 (未找到时为 `None`)。
pub fn load_config() -> Result<(AppConfig, Option<String>), ConfigError> {
    let mut candidates = Vec::new();
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        candidates.push(path);
    }
    candidates.push("config.toml".to_string());
    candidates.push("./config/config.toml".to_string());

    let source = candidates.into_iter().find(|p| Path::new(p).exists());
    let mut config = match &source {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };

    config.apply_port_override(env::var(PORT_ENV).ok().as_deref())?;
    config.validate()?;

    Ok((config, source))
}
