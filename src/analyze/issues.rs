use crate::types::metadata::RepositoryMetadata;
use crate::types::report::CriterionResult;
use crate::types::scoring::Criterion;

/// Open issues tolerated before any penalty: a flat 10 plus one per 20
/// stars, so popular projects with large but triaged backlogs are not
/// punished for their popularity.
pub fn issue_allowance(stars: u64) -> u64 {
    10 + stars / 20
}

pub fn issue_hygiene_score(metadata: &RepositoryMetadata) -> CriterionResult {
    if !metadata.has_issues {
        return CriterionResult::new(
            Criterion::IssueHygiene,
            5,
            "Issue tracker is disabled; users have no public channel for bug reports",
        );
    }

    let open = metadata.open_issues;
    let allowance = issue_allowance(metadata.stars);
    let score = if open <= allowance {
        10
    } else if open <= allowance * 2 {
        7
    } else if open <= allowance * 4 {
        4
    } else {
        1
    };

    let message = if open == 0 {
        "No open issues".to_string()
    } else {
        format!("{open} open issues (healthy backlog up to {allowance})")
    };
    CriterionResult::new(Criterion::IssueHygiene, score, message)
}
