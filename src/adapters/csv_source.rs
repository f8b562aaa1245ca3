use crate::domain::model::CollegeRecord;
use crate::domain::ports::CollegeSource;
use crate::utils::error::{AppError, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

const REQUIRED_COLUMNS: [&str; 5] = ["college_name", "state", "type", "fees", "seats"];
const CUTOFF_COLUMNS: [&str; 5] = [
    "cutoff_gen",
    "cutoff_obc",
    "cutoff_sc",
    "cutoff_st",
    "cutoff_ews",
];

#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CollegeSource for CsvFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load_records(&self) -> Result<Vec<CollegeRecord>> {
        let file = File::open(&self.path)?;
        read_records(file)
    }
}

/// 讀取含標題列的 CSV，依檔案順序產生紀錄
///
/// Every row must have as many fields as the header; a ragged row fails the
/// whole read. Rows with an empty `college_name` are skipped.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<CollegeRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    let position = |name: &str| headers.iter().position(|h| h == name);

    let mut required = [0usize; 5];
    for (slot, column) in required.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = position(column).ok_or_else(|| AppError::MissingColumnError {
            column: column.to_string(),
        })?;
    }
    let [name_idx, state_idx, type_idx, fees_idx, seats_idx] = required;
    let cutoff_idx = CUTOFF_COLUMNS.map(|column| position(column));

    let known: Vec<usize> = required
        .iter()
        .copied()
        .chain(cutoff_idx.iter().flatten().copied())
        .collect();

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let row_data = result?;
        let field = |idx: usize| row_data.get(idx).unwrap_or_default().to_string();
        let cutoff = |slot: usize| cutoff_idx[slot].map(|idx| field(idx));

        let college_name = field(name_idx);
        if college_name.trim().is_empty() {
            // 標題列為第 1 行
            tracing::warn!("Skipping row {}: empty college_name", row + 2);
            continue;
        }

        let extra: BTreeMap<String, String> = headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| !known.contains(idx))
            .map(|(idx, header)| (header.clone(), field(idx)))
            .collect();

        records.push(CollegeRecord {
            college_name,
            state: field(state_idx),
            college_type: field(type_idx),
            fees: field(fees_idx),
            seats: field(seats_idx),
            cutoff_gen: cutoff(0),
            cutoff_obc: cutoff(1),
            cutoff_sc: cutoff(2),
            cutoff_st: cutoff(3),
            cutoff_ews: cutoff(4),
            extra,
        });
    }

    tracing::debug!("Parsed {} rows with {} columns", records.len(), headers.len());
    Ok(records)
}
