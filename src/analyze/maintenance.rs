use chrono::{DateTime, Utc};

use crate::types::metadata::RepositoryMetadata;
use crate::types::report::CriterionResult;
use crate::types::scoring::{Criterion, Points};

/// Score ceiling for archived repositories.
const ARCHIVED_CAP: Points = 4;

pub fn maintenance_score(metadata: &RepositoryMetadata, now: DateTime<Utc>) -> CriterionResult {
    let days = metadata.days_since_update(now);
    let (recency, mut message) = match days {
        0 => (11, "Updated today".to_string()),
        1..=30 => (11, format!("Updated {} ago", describe_days(days))),
        31..=90 => (8, format!("Updated within 3 months ({} ago)", describe_days(days))),
        91..=180 => (5, format!("Updated within 6 months ({} ago)", describe_days(days))),
        181..=365 => (3, format!("Updated within a year ({} ago)", describe_days(days))),
        _ => (0, format!("Not updated for {}", describe_days(days))),
    };

    let (activity, history) = commit_activity(metadata.recent_commits);
    message.push_str(", ");
    message.push_str(&history);

    let mut score = recency + activity;
    if metadata.archived {
        score = score.min(ARCHIVED_CAP);
        message.push_str("; repository is archived");
    }

    CriterionResult::new(Criterion::Maintenance, score, message)
}

/// Points for the depth of the sampled commit history.
fn commit_activity(commits: u32) -> (Points, String) {
    match commits {
        0 => (0, "no commit history".to_string()),
        c if c >= 20 => (4, format!("{c} recent commits")),
        c if c >= 10 => (3, format!("{c} recent commits")),
        c if c >= 5 => (2, format!("{c} recent commits")),
        1 => (1, "a single commit".to_string()),
        c => (1, format!("only {c} commits")),
    }
}

fn describe_days(days: i64) -> String {
    match days {
        1 => "1 day".to_string(),
        d if d < 730 => format!("{d} days"),
        d => format!("{} years", d / 365),
    }
}
