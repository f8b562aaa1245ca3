use crate::domain::model::CollegeRecord;
use crate::utils::error::Result;

/// 資料集來源：回傳依檔案順序排列的紀錄
pub trait CollegeSource: Send + Sync {
    fn describe(&self) -> String;
    fn load_records(&self) -> Result<Vec<CollegeRecord>>;
}
