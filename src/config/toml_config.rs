use crate::utils::error::{AppError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub dataset: Option<DatasetSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetSection {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| AppError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATASET_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn host(&self) -> Option<&str> {
        self.server.as_ref()?.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.server.as_ref()?.port
    }

    pub fn dataset_path(&self) -> Option<&str> {
        self.dataset.as_ref()?.path.as_deref()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref()?.level.as_deref()
    }

    pub fn log_json(&self) -> Option<bool> {
        self.logging.as_ref()?.json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[server]
host = "127.0.0.1"
port = 8080

[dataset]
path = "data/colleges.csv"

[logging]
level = "debug"
json = true
"#,
        )
        .unwrap();

        assert_eq!(config.host(), Some("127.0.0.1"));
        assert_eq!(config.port(), Some(8080));
        assert_eq!(config.dataset_path(), Some("data/colleges.csv"));
        assert_eq!(config.log_level(), Some("debug"));
        assert_eq!(config.log_json(), Some(true));
    }

    #[test]
    fn test_sections_are_optional() {
        let config = TomlConfig::from_toml_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.port(), Some(9000));
        assert!(config.host().is_none());
        assert!(config.dataset_path().is_none());
        assert!(config.log_json().is_none());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("MEDIPREDICT_TEST_DATA_DIR", "/srv/data");
        let config = TomlConfig::from_toml_str(
            "[dataset]\npath = \"${MEDIPREDICT_TEST_DATA_DIR}/colleges.csv\"\n",
        )
        .unwrap();
        assert_eq!(config.dataset_path(), Some("/srv/data/colleges.csv"));

        let untouched = TomlConfig::from_toml_str(
            "[dataset]\npath = \"${MEDIPREDICT_TEST_UNSET_VAR}/x.csv\"\n",
        )
        .unwrap();
        assert_eq!(
            untouched.dataset_path(),
            Some("${MEDIPREDICT_TEST_UNSET_VAR}/x.csv")
        );
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, AppError::ConfigError { .. }));

        let err = TomlConfig::from_toml_str("[server]\nport = \"not a port\"\n").unwrap_err();
        assert!(matches!(err, AppError::ConfigError { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = TomlConfig::from_file("/no/such/medipredict.toml").unwrap_err();
        assert!(matches!(err, AppError::ConfigError { .. }));
    }
}
