pub mod dataset;
pub mod query;
pub mod scorer;

pub use crate::domain::model::{Category, Chance, ChanceLevel, CollegeRecord, PredictionResult};
pub use crate::domain::ports::CollegeSource;
pub use crate::utils::error::Result;
