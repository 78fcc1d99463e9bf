use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of commits requested from the history endpoint.
pub const COMMIT_SAMPLE_SIZE: u32 = 30;

/// How strongly the root listing suggests the project has tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestEvidence {
    #[default]
    None,
    /// Test-named files or a test framework config at the root.
    Files,
    /// A dedicated test directory at the root.
    Directory,
}

/// Snapshot of one repository taken at fetch time.
///
/// Every optional field of the GitHub payload has a concrete default here so
/// the scoring rules never need to handle a missing value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub open_issues: u64,
    #[serde(default)]
    pub size_kb: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub has_readme: bool,
    #[serde(default)]
    pub readme_bytes: u64,
    #[serde(default)]
    pub has_license: bool,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub tests: TestEvidence,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Lowercased names of the directories in the root listing.
    #[serde(default)]
    pub directories: Vec<String>,
    /// Commits on the first page of history, at most [`COMMIT_SAMPLE_SIZE`].
    #[serde(default)]
    pub recent_commits: u32,
    #[serde(default = "default_branch")]
    pub default_branch: String,
    #[serde(default)]
    pub has_wiki: bool,
    #[serde(default = "default_true")]
    pub has_issues: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub html_url: String,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_true() -> bool {
    true
}

impl RepositoryMetadata {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Whole days between `from` and `now`, clamped at zero.
    pub fn days_between(from: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(from).num_days().max(0)
    }

    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        Self::days_between(self.created_at, now)
    }

    pub fn days_since_update(&self, now: DateTime<Utc>) -> i64 {
        Self::days_between(self.updated_at, now)
    }
}

/// The subset of metadata echoed back to the browser next to the analysis.
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryInfo {
    pub name: String,
    pub owner: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub size: u64,
    pub has_wiki: bool,
    pub has_issues: bool,
    pub open_issues: u64,
    pub recent_commits: u32,
    pub license: Option<String>,
    pub topics: Vec<String>,
    pub default_branch: String,
    pub html_url: String,
}

impl From<&RepositoryMetadata> for RepositoryInfo {
    fn from(metadata: &RepositoryMetadata) -> Self {
        let description = Some(metadata.description.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        Self {
            name: metadata.name.clone(),
            owner: metadata.owner.clone(),
            description,
            stars: metadata.stars,
            forks: metadata.forks,
            language: metadata.language.clone(),
            created_at: metadata.created_at,
            updated_at: metadata.updated_at,
            size: metadata.size_kb,
            has_wiki: metadata.has_wiki,
            has_issues: metadata.has_issues,
            open_issues: metadata.open_issues,
            recent_commits: metadata.recent_commits,
            license: metadata.license.clone(),
            topics: metadata.topics.clone(),
            default_branch: metadata.default_branch.clone(),
            html_url: metadata.html_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn minimal_document_fills_defaults() {
        let metadata: RepositoryMetadata = serde_json::from_str(
            r#"{
                "owner": "octo",
                "name": "demo",
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-06-01T00:00:00Z"
            }"#,
        )
        .expect("minimal metadata should parse");

        assert_eq!(metadata.language, None);
        assert_eq!(metadata.tests, TestEvidence::None);
        assert_eq!(metadata.default_branch, "main");
        assert!(metadata.has_issues);
        assert!(metadata.description.is_empty());
        assert!(metadata.directories.is_empty());
        assert_eq!(metadata.recent_commits, 0);
    }

    #[test]
    fn days_since_update_never_goes_negative() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let future = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(RepositoryMetadata::days_between(future, now), 0);
        assert_eq!(
            RepositoryMetadata::days_between(Utc.with_ymd_and_hms(2025, 12, 22, 0, 0, 0).unwrap(), now),
            10
        );
    }

    #[test]
    fn repository_info_drops_blank_description() {
        let metadata: RepositoryMetadata = serde_json::from_str(
            r#"{
                "owner": "octo",
                "name": "demo",
                "description": "   ",
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-06-01T00:00:00Z"
            }"#,
        )
        .expect("metadata should parse");

        let info = RepositoryInfo::from(&metadata);
        assert_eq!(info.description, None);
        assert_eq!(info.owner, "octo");
    }
}
