pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::path::PathBuf;
use toml_config::TomlConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATASET: &str = "colleges_50_clean.csv";
pub const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "medipredict")]
#[command(about = "College admission chance prediction API")]
pub struct ServerConfig {
    #[arg(long, env = "MEDIPREDICT_HOST", help = "Address to bind [default: 0.0.0.0]")]
    pub host: Option<String>,

    #[arg(long, env = "PORT", help = "Port to listen on [default: 5000]")]
    pub port: Option<u16>,

    #[arg(
        long,
        env = "MEDIPREDICT_DATASET",
        help = "College dataset CSV [default: colleges_50_clean.csv]"
    )]
    pub dataset: Option<String>,

    #[arg(long, short = 'c', help = "Optional TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

/// 合併後的執行配置：命令列/環境變數 > TOML 檔案 > 預設值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub dataset_path: String,
    pub log_level: String,
    pub log_json: bool,
    pub verbose: bool,
}

impl ServerConfig {
    pub fn resolve(&self) -> Result<AppConfig> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        Ok(self.merge(&file))
    }

    pub fn merge(&self, file: &TomlConfig) -> AppConfig {
        AppConfig {
            host: self
                .host
                .clone()
                .or_else(|| file.host().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port.or(file.port()).unwrap_or(DEFAULT_PORT),
            dataset_path: self
                .dataset
                .clone()
                .or_else(|| file.dataset_path().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_DATASET.to_string()),
            log_level: file
                .log_level()
                .unwrap_or(DEFAULT_LOG_LEVEL)
                .to_lowercase(),
            log_json: self.log_json || file.log_json().unwrap_or(false),
            verbose: self.verbose,
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.host)?;
        validation::validate_path("dataset.path", &self.dataset_path)?;
        validation::validate_one_of("logging.level", &self.log_level, &LOG_LEVELS)?;
        Ok(())
    }
}
