use crate::domain::model::CollegeRecord;
use crate::domain::ports::CollegeSource;

/// 啟動時載入一次的唯讀資料集
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<CollegeRecord>,
}

impl Dataset {
    pub fn new(records: Vec<CollegeRecord>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Load failures are logged and leave the dataset empty.
    pub fn load<S: CollegeSource + ?Sized>(source: &S) -> Self {
        match source.load_records() {
            Ok(records) => {
                tracing::info!("✅ Loaded {} colleges from {}", records.len(), source.describe());
                Self::new(records)
            }
            Err(e) => {
                tracing::error!(
                    "❌ Error loading colleges from {}: {} (Category: {:?})",
                    source.describe(),
                    e,
                    e.category()
                );
                Self::empty()
            }
        }
    }

    pub fn records(&self) -> &[CollegeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
