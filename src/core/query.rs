use crate::core::dataset::Dataset;
use crate::core::scorer;
use crate::domain::model::{Category, CollegeRecord, PredictionResult};
use crate::utils::error::{AppError, Result};
use serde_json::Value;

/// 預測結果最多回傳筆數
pub const MAX_PREDICTIONS: usize = 30;

#[derive(Debug, Clone)]
pub struct Prediction {
    /// 截斷前的符合筆數
    pub total_matches: usize,
    pub colleges: Vec<PredictionResult>,
}

/// 將請求中的 rank 轉成正整數
///
/// Accepts JSON integers, numbers with a fractional part (truncated toward
/// zero) and numeric strings with surrounding whitespace.
pub fn coerce_rank(value: Option<&Value>) -> Result<i64> {
    let rank = match value {
        None | Some(Value::Null) => return Err(AppError::MissingRankError),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Some(i),
            None => n
                .as_f64()
                .map(f64::trunc)
                .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64),
        },
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    match rank {
        Some(rank) if rank > 0 => Ok(rank),
        Some(rank) => Err(AppError::InvalidRankError {
            value: format!("{} (rank must be a positive integer)", rank),
        }),
        None => Err(AppError::InvalidRankError {
            value: value.map(Value::to_string).unwrap_or_default(),
        }),
    }
}

/// 對每所學校計算錄取機會，依機會由高到低排序
///
/// Records whose cutoff for the category does not parse as an integer are
/// skipped. The sort is stable so equal chances keep dataset order.
pub fn predict(dataset: &Dataset, rank: i64, category: Category) -> Prediction {
    tracing::debug!(
        "Predicting for rank {} using column {}",
        rank,
        category.column()
    );

    let mut results: Vec<PredictionResult> = dataset
        .records()
        .iter()
        .filter_map(|record| {
            let cutoff = record.cutoff(category)?;
            Some(PredictionResult::new(record, cutoff, scorer::score(rank, cutoff)))
        })
        .collect();

    let skipped = dataset.len() - results.len();
    if skipped > 0 {
        tracing::debug!("Skipped {} colleges with unusable cutoff values", skipped);
    }

    results.sort_by(|a, b| b.chance.cmp(&a.chance));

    let total_matches = results.len();
    results.truncate(MAX_PREDICTIONS);

    Prediction {
        total_matches,
        colleges: results,
    }
}

pub fn list_all(dataset: &Dataset) -> &[CollegeRecord] {
    dataset.records()
}

/// 名稱子字串搜尋，不分大小寫；空字串符合全部
pub fn search_by_name<'a>(dataset: &'a Dataset, fragment: &str) -> Vec<&'a CollegeRecord> {
    let needle = fragment.to_lowercase();
    dataset
        .records()
        .iter()
        .filter(|record| record.college_name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ChanceLevel;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn college(name: &str, gen: &str, obc: &str) -> CollegeRecord {
        CollegeRecord {
            college_name: name.to_string(),
            state: "Tamil Nadu".to_string(),
            college_type: "Government".to_string(),
            fees: "13610".to_string(),
            seats: "250".to_string(),
            cutoff_gen: Some(gen.to_string()),
            cutoff_obc: Some(obc.to_string()),
            cutoff_sc: Some("20000".to_string()),
            cutoff_st: Some("30000".to_string()),
            cutoff_ews: Some("5000".to_string()),
            extra: BTreeMap::new(),
        }
    }

    fn dataset(records: Vec<CollegeRecord>) -> Dataset {
        Dataset::new(records)
    }

    #[test]
    fn test_single_record_example() {
        let data = dataset(vec![college("X Institute", "1000", "1000")]);
        let prediction = predict(&data, 900, Category::General);

        assert_eq!(prediction.total_matches, 1);
        let result = &prediction.colleges[0];
        assert_eq!(result.college_name, "X Institute");
        assert_eq!(result.cutoff, 1000);
        assert_eq!(result.chance, 62);
        assert_eq!(result.chance_level, ChanceLevel::High);
    }

    #[test]
    fn test_results_sorted_by_chance_descending() {
        let data = dataset(vec![
            college("Far", "500", "500"),
            college("Close", "1100", "1100"),
            college("Safe", "50000", "50000"),
            college("Mid", "1800", "1800"),
        ]);
        let prediction = predict(&data, 1500, Category::General);

        let names: Vec<&str> = prediction
            .colleges
            .iter()
            .map(|c| c.college_name.as_str())
            .collect();
        assert_eq!(names, vec!["Safe", "Mid", "Close", "Far"]);
        assert!(prediction
            .colleges
            .windows(2)
            .all(|w| w[0].chance >= w[1].chance));
    }

    #[test]
    fn test_equal_chances_keep_dataset_order() {
        let data = dataset(vec![
            college("First", "100000", "1"),
            college("Second", "200000", "1"),
            college("Third", "300000", "1"),
        ]);
        let prediction = predict(&data, 10, Category::General);

        let names: Vec<&str> = prediction
            .colleges
            .iter()
            .map(|c| c.college_name.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
        assert!(prediction.colleges.iter().all(|c| c.chance == 95));
    }

    #[test]
    fn test_truncates_to_top_thirty() {
        let records = (0..45)
            .map(|i| college(&format!("College {}", i), &(1000 + i * 100).to_string(), "1"))
            .collect();
        let data = dataset(records);
        let prediction = predict(&data, 1200, Category::General);

        assert_eq!(prediction.total_matches, 45);
        assert_eq!(prediction.colleges.len(), MAX_PREDICTIONS);
        // cutoff >= 2200 都是 95，同分維持原順序
        assert_eq!(prediction.colleges[0].college_name, "College 12");
        assert_eq!(prediction.colleges[0].chance, 95);
    }

    #[test]
    fn test_bad_cutoff_rows_are_skipped() {
        let data = dataset(vec![
            college("Good A", "2000", "1"),
            college("Broken", "N/A", "1"),
            college("Empty", "", "1"),
            college("Good B", "900", "1"),
        ]);
        let prediction = predict(&data, 1000, Category::General);

        assert_eq!(prediction.total_matches, 2);
        let names: Vec<&str> = prediction
            .colleges
            .iter()
            .map(|c| c.college_name.as_str())
            .collect();
        assert_eq!(names, vec!["Good A", "Good B"]);
    }

    #[test]
    fn test_category_selects_cutoff_column() {
        let data = dataset(vec![college("X", "1000", "4000")]);

        let obc = predict(&data, 1500, Category::resolve("OBC"));
        assert_eq!(obc.colleges[0].cutoff, 4000);

        let sc = predict(&data, 1500, Category::resolve("sc"));
        assert_eq!(sc.colleges[0].cutoff, 20000);
    }

    #[test]
    fn test_unknown_category_matches_general() {
        let data = dataset(vec![
            college("A", "1000", "4000"),
            college("B", "700", "9000"),
            college("C", "5000", "100"),
        ]);
        let unknown = predict(&data, 800, Category::resolve("unknown"));
        let general = predict(&data, 800, Category::resolve("general"));

        assert_eq!(unknown.total_matches, general.total_matches);
        assert_eq!(unknown.colleges, general.colleges);
    }

    #[test]
    fn test_predict_on_empty_dataset() {
        let prediction = predict(&Dataset::empty(), 100, Category::General);
        assert_eq!(prediction.total_matches, 0);
        assert!(prediction.colleges.is_empty());
    }

    #[test]
    fn test_coerce_rank() {
        assert_eq!(coerce_rank(Some(&json!(900))).unwrap(), 900);
        assert_eq!(coerce_rank(Some(&json!("1200"))).unwrap(), 1200);
        assert_eq!(coerce_rank(Some(&json!(" 42 "))).unwrap(), 42);
        assert_eq!(coerce_rank(Some(&json!(900.9))).unwrap(), 900);

        assert!(matches!(coerce_rank(None), Err(AppError::MissingRankError)));
        assert!(matches!(
            coerce_rank(Some(&Value::Null)),
            Err(AppError::MissingRankError)
        ));
        for bad in [json!("abc"), json!("12.5"), json!(true), json!([1]), json!(0), json!(-5)] {
            assert!(
                matches!(coerce_rank(Some(&bad)), Err(AppError::InvalidRankError { .. })),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_search_by_name() {
        let data = dataset(vec![
            college("Madras Medical College", "1", "1"),
            college("Stanley Medical College", "1", "1"),
            college("AIIMS Delhi", "1", "1"),
        ]);

        let hits = search_by_name(&data, "MEDICAL");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].college_name, "Madras Medical College");

        assert_eq!(search_by_name(&data, "").len(), 3);
        assert!(search_by_name(&data, "Harvard").is_empty());
        assert_eq!(list_all(&data).len(), 3);
    }
}
