use crate::core::fixture::DEFAULT_CATALOG_SIZE;
use crate::core::pagination::DEFAULT_PAGE_SIZE;
use crate::core::ConfigProvider;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const MAX_CATALOG_SIZE: usize = 100_000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub catalog: CatalogSection,
    pub store: StoreSection,
    pub logging: LoggingSection,
    pub users: Vec<UserSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    pub allowed_origin: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    pub size: usize,
    pub page_size: usize,
    pub seed: Option<u64>,
    pub snapshot_path: Option<String>,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            size: DEFAULT_CATALOG_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
            seed: None,
            snapshot_path: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Memory,
    Rest,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub r#type: StoreKind,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub json: bool,
}

/// 預先建立的使用者，`token` 供 bearer 驗證使用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSeed {
    pub id: String,
    pub token: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl ServerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${USER_SERVICE_URL})，未設定的保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_range("server.port", self.server.port, 1, u16::MAX)?;
        validate_url("server.allowed_origin", &self.server.allowed_origin)?;

        validate_range("catalog.size", self.catalog.size, 0, MAX_CATALOG_SIZE)?;
        validate_positive_number("catalog.page_size", self.catalog.page_size, 1)?;
        if let Some(path) = &self.catalog.snapshot_path {
            validate_path("catalog.snapshot_path", path)?;
            validate_file_extension("catalog.snapshot_path", path, &["json", "csv"])?;
        }

        if self.store.r#type == StoreKind::Rest {
            let endpoint = validate_required_field("store.endpoint", &self.store.endpoint)?;
            validate_url("store.endpoint", endpoint)?;
        }
        if let Some(timeout) = self.store.timeout_seconds {
            validate_positive_number("store.timeout_seconds", timeout as usize, 1)?;
        }

        if let Some(level) = &self.logging.level {
            if !LOG_LEVELS.contains(&level.as_str()) {
                return Err(AppError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
                });
            }
        }

        self.validate_users()
    }

    fn validate_users(&self) -> Result<()> {
        let mut ids = HashSet::new();
        let mut tokens = HashSet::new();

        for user in &self.users {
            validate_non_empty_string("users.id", &user.id)?;
            if !ids.insert(user.id.as_str()) {
                return Err(AppError::ConfigValidationError {
                    field: "users.id".to_string(),
                    message: format!("duplicate user id: {}", user.id),
                });
            }

            if let Some(token) = &user.token {
                validate_non_empty_string("users.token", token)?;
                if !tokens.insert(token.as_str()) {
                    return Err(AppError::ConfigValidationError {
                        field: "users.token".to_string(),
                        message: format!("token for user {} is already assigned", user.id),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn store_timeout_seconds(&self) -> u64 {
        self.store
            .timeout_seconds
            .unwrap_or(crate::adapters::rest_store::DEFAULT_TIMEOUT_SECS)
    }
}

impl ConfigProvider for ServerConfig {
    fn catalog_size(&self) -> usize {
        self.catalog.size
    }

    fn catalog_seed(&self) -> Option<u64> {
        self.catalog.seed
    }

    fn snapshot_path(&self) -> Option<&str> {
        self.catalog.snapshot_path.as_deref()
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
