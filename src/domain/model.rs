use serde::Serialize;
use std::collections::BTreeMap;

/// 資料集中的一列，欄位內容保持檔案原文
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollegeRecord {
    pub college_name: String,
    pub state: String,
    #[serde(rename = "type")]
    pub college_type: String,
    pub fees: String,
    pub seats: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutoff_gen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutoff_obc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutoff_sc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutoff_st: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutoff_ews: Option<String>,
    /// 其他未知欄位，原樣保留
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// Cutoff used when the dataset has no column for the requested category.
pub const MISSING_CUTOFF_DEFAULT: i64 = 999_999;

impl CollegeRecord {
    pub fn cutoff_field(&self, category: Category) -> Option<&str> {
        let field = match category {
            Category::General => &self.cutoff_gen,
            Category::Obc => &self.cutoff_obc,
            Category::Sc => &self.cutoff_sc,
            Category::St => &self.cutoff_st,
            Category::Ews => &self.cutoff_ews,
        };
        field.as_deref()
    }

    /// 取得指定類別的 cutoff；欄位內容無法轉成整數時回傳 None
    pub fn cutoff(&self, category: Category) -> Option<i64> {
        match self.cutoff_field(category) {
            Some(raw) => parse_cutoff(raw),
            None => Some(MISSING_CUTOFF_DEFAULT),
        }
    }
}

/// 整數欄位，允許數字間的單一底線 (例如 `1_000`)
fn parse_cutoff(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if !trimmed.contains('_') {
        return trimmed.parse::<i64>().ok();
    }

    let digits = trimmed
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(trimmed);
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return None;
    }
    trimmed.replace('_', "").parse::<i64>().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    General,
    Obc,
    Sc,
    St,
    Ews,
}

const CATEGORY_TABLE: [(&str, Category); 6] = [
    ("general", Category::General),
    ("unreserved", Category::General),
    ("obc", Category::Obc),
    ("sc", Category::Sc),
    ("st", Category::St),
    ("ews", Category::Ews),
];

impl Category {
    /// 不分大小寫；無法辨識的類別一律使用 general
    pub fn resolve(name: &str) -> Self {
        let lowered = name.to_lowercase();
        CATEGORY_TABLE
            .iter()
            .find(|(key, _)| *key == lowered)
            .map(|(_, category)| *category)
            .unwrap_or(Category::General)
    }

    pub fn column(&self) -> &'static str {
        match self {
            Category::General => "cutoff_gen",
            Category::Obc => "cutoff_obc",
            Category::Sc => "cutoff_sc",
            Category::St => "cutoff_st",
            Category::Ews => "cutoff_ews",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChanceLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chance {
    pub chance: u8,
    pub level: ChanceLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionResult {
    pub college_name: String,
    pub state: String,
    #[serde(rename = "type")]
    pub college_type: String,
    pub fees: String,
    pub seats: String,
    pub cutoff: i64,
    pub chance: u8,
    pub chance_level: ChanceLevel,
}

impl PredictionResult {
    pub fn new(record: &CollegeRecord, cutoff: i64, chance: Chance) -> Self {
        Self {
            college_name: record.college_name.clone(),
            state: record.state.clone(),
            college_type: record.college_type.clone(),
            fees: record.fees.clone(),
            seats: record.seats.clone(),
            cutoff,
            chance: chance.chance,
            chance_level: chance.level,
        }
    }
}
