pub mod community;
pub mod documentation;
pub mod issues;
pub mod maintenance;
pub mod roadmap;
pub mod structure;
pub mod summary;
pub mod testing;

use chrono::{DateTime, Utc};

use crate::types::metadata::RepositoryMetadata;
use crate::types::report::AnalysisResult;
use crate::types::scoring::{Level, Points};

/// Scores `metadata` as of `now`.
///
/// Total over well-formed metadata: every rule reads only the fields it
/// needs and falls back to a defined default for absent ones.
pub fn analyze(metadata: &RepositoryMetadata, now: DateTime<Utc>) -> AnalysisResult {
    let breakdown = vec![
        documentation::documentation_score(metadata),
        community::community_score(metadata, now),
        testing::testing_score(metadata),
        maintenance::maintenance_score(metadata, now),
        issues::issue_hygiene_score(metadata),
        structure::structure_score(metadata),
    ];

    let score: Points = breakdown.iter().map(|result| result.score).sum();
    let level = Level::from_score(score);
    let summary = summary::summary(metadata, score, level, &breakdown);
    let roadmap = roadmap::roadmap(&breakdown);

    tracing::debug!(
        repository = %metadata.full_name(),
        score,
        level = level.as_str(),
        roadmap_items = roadmap.len(),
        "analysis complete"
    );

    let mut result = AnalysisResult {
        score,
        level,
        breakdown,
        summary,
        roadmap,
    };
    result.sort_roadmap();
    result
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::types::metadata::{RepositoryMetadata, TestEvidence};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    /// A repository that satisfies every criterion.
    pub fn healthy_repo() -> RepositoryMetadata {
        RepositoryMetadata {
            owner: "octo".to_string(),
            name: "demo".to_string(),
            language: Some("Rust".to_string()),
            stars: 5_000,
            forks: 400,
            open_issues: 12,
            size_kb: 4_096,
            created_at: now() - Duration::days(2_000),
            updated_at: now() - Duration::days(2),
            has_readme: true,
            readme_bytes: 8_000,
            has_license: true,
            license: Some("MIT".to_string()),
            tests: TestEvidence::Directory,
            description: "A demonstration repository for scoring".to_string(),
            topics: vec!["rust".to_string(), "cli".to_string()],
            directories: vec!["src".to_string(), "docs".to_string(), "tests".to_string()],
            recent_commits: 30,
            default_branch: "main".to_string(),
            has_wiki: true,
            has_issues: true,
            archived: false,
            html_url: "https://github.com/octo/demo".to_string(),
        }
    }

    /// A neglected, nearly empty repository.
    pub fn abandoned_repo() -> RepositoryMetadata {
        RepositoryMetadata {
            owner: "someone".to_string(),
            name: "scratch".to_string(),
            language: None,
            stars: 0,
            forks: 0,
            open_issues: 0,
            size_kb: 1,
            created_at: now() - Duration::days(900),
            updated_at: now() - Duration::days(730),
            has_readme: false,
            readme_bytes: 0,
            has_license: false,
            license: None,
            tests: TestEvidence::None,
            description: String::new(),
            topics: Vec::new(),
            directories: Vec::new(),
            recent_commits: 0,
            default_branch: "master".to_string(),
            has_wiki: false,
            has_issues: true,
            archived: false,
            html_url: String::new(),
        }
    }
}
