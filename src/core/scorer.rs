use crate::domain::model::{Chance, ChanceLevel};

/// 依排名與 cutoff 計算錄取機會
///
/// Bands are checked in order; `//` in the band formulas is floor division.
/// Inside every band the dividend is non-negative, so floor and truncation agree.
pub fn score(rank: i64, cutoff: i64) -> Chance {
    let ahead = cutoff.saturating_sub(rank);
    let behind = rank.saturating_sub(cutoff);

    let (chance, level) = if rank <= cutoff.saturating_sub(500) {
        ((85i64.saturating_add(ahead.div_euclid(100))).min(95), ChanceLevel::High)
    } else if rank <= cutoff {
        ((60 + ahead.div_euclid(50)).min(85), ChanceLevel::High)
    } else if rank <= cutoff.saturating_add(500) {
        ((60 - behind.div_euclid(20)).max(40), ChanceLevel::Medium)
    } else if rank <= cutoff.saturating_add(2000) {
        ((40 - behind.div_euclid(100)).max(20), ChanceLevel::Medium)
    } else {
        ((20i64.saturating_sub(behind.div_euclid(500))).max(5), ChanceLevel::Low)
    };

    Chance {
        // 每個區間的結果都落在 5..=95
        chance: chance.clamp(0, 100) as u8,
        level,
    }
}
