// Adapters layer: concrete implementations for external systems (dataset file, http).

pub mod csv_source;
pub mod http;
