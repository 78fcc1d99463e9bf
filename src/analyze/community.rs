use chrono::{DateTime, Utc};

use crate::types::metadata::RepositoryMetadata;
use crate::types::report::CriterionResult;
use crate::types::scoring::{Criterion, Points};

/// (minimum effective stars, points), highest band first.
const STAR_BANDS: [(u64, Points); 6] = [(1000, 14), (500, 12), (100, 10), (50, 8), (10, 5), (1, 2)];
/// (minimum effective forks, points), highest band first.
const FORK_BANDS: [(u64, Points); 4] = [(100, 6), (25, 4), (5, 2), (1, 1)];

/// Multiplier applied to raw counts so young repositories reach the same
/// bands with less accumulated attention.
pub fn recency_multiplier(age_days: i64) -> u64 {
    match age_days {
        d if d < 90 => 4,
        d if d < 365 => 2,
        _ => 1,
    }
}

fn band(value: u64, bands: &[(u64, Points)]) -> Points {
    bands
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

pub fn community_score(metadata: &RepositoryMetadata, now: DateTime<Utc>) -> CriterionResult {
    let multiplier = recency_multiplier(metadata.age_days(now));
    let stars = band(metadata.stars.saturating_mul(multiplier), &STAR_BANDS);
    let forks = band(metadata.forks.saturating_mul(multiplier), &FORK_BANDS);

    let mut message = format!(
        "{} stars, {} forks",
        group_thousands(metadata.stars),
        group_thousands(metadata.forks)
    );
    if multiplier > 1 {
        message.push_str(" (young repository, thresholds relaxed)");
    }

    CriterionResult::new(Criterion::Community, stars + forks, message)
}

/// Formats `1234567` as `1,234,567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
