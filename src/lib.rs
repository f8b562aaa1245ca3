pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{csv_source::CsvFileSource, http::create_router};
pub use config::{AppConfig, ServerConfig};
pub use crate::core::{dataset::Dataset, query::MAX_PREDICTIONS};
pub use utils::error::{AppError, Result};
