//! Wire shapes of the GitHub REST responses and their conversion into
//! [`RepositoryMetadata`]. This is the only place that knows about the
//! loosely-typed API JSON.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::metadata::{RepositoryMetadata, TestEvidence};

#[derive(Debug, Clone, Deserialize)]
pub struct RawRepository {
    pub name: String,
    pub owner: RawOwner,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub license: Option<RawLicense>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub has_wiki: bool,
    #[serde(default = "default_true")]
    pub has_issues: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub html_url: String,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOwner {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLicense {
    #[serde(default)]
    pub spdx_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of the root directory listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawContentEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub size: u64,
}

impl RawContentEntry {
    fn is_dir(&self) -> bool {
        self.kind == "dir"
    }

    fn is_file(&self) -> bool {
        self.kind == "file"
    }
}

/// Error body GitHub returns alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct RawApiError {
    #[serde(default)]
    pub message: String,
}

const TEST_DIRS: [&str; 7] = ["test", "tests", "__tests__", "spec", "specs", "cypress", "e2e"];

const TEST_CONFIG_FILES: [&str; 12] = [
    "jest.config.js",
    "jest.config.ts",
    "vitest.config.ts",
    "vitest.config.js",
    "karma.conf.js",
    "pytest.ini",
    "tox.ini",
    "conftest.py",
    "phpunit.xml",
    "phpunit.xml.dist",
    ".rspec",
    "cypress.config.js",
];

pub fn detect_tests(entries: &[RawContentEntry]) -> TestEvidence {
    let has_dir = entries
        .iter()
        .any(|entry| entry.is_dir() && is_test_dir_name(&entry.name));
    if has_dir {
        return TestEvidence::Directory;
    }

    let has_files = entries.iter().filter(|entry| entry.is_file()).any(|entry| {
        let name = entry.name.to_lowercase();
        TEST_CONFIG_FILES.contains(&name.as_str())
            || name.starts_with("test_")
            || name.starts_with("test.")
            || name.contains(".test.")
            || name.contains(".spec.")
            || name.contains("_test.")
    });
    if has_files {
        TestEvidence::Files
    } else {
        TestEvidence::None
    }
}

/// `tests`, `e2e-tests` or `unit_tests` qualify; `testing-notes` does not.
fn is_test_dir_name(name: &str) -> bool {
    let name = name.to_lowercase();
    TEST_DIRS.contains(&name.as_str())
        || name
            .split(['-', '_', '.'])
            .any(|token| TEST_DIRS.contains(&token))
}

fn find_readme(entries: &[RawContentEntry]) -> Option<&RawContentEntry> {
    entries
        .iter()
        .find(|entry| entry.is_file() && entry.name.to_uppercase().starts_with("README"))
}

fn license_file_present(entries: &[RawContentEntry]) -> bool {
    entries.iter().any(|entry| {
        let name = entry.name.to_uppercase();
        entry.is_file() && (name.starts_with("LICENSE") || name.starts_with("LICENCE") || name.starts_with("COPYING"))
    })
}

impl RawRepository {
    /// Combines the repository record with its root listing and the number
    /// of commits on the first page of history.
    pub fn into_metadata(
        self,
        entries: &[RawContentEntry],
        recent_commits: u32,
    ) -> RepositoryMetadata {
        let readme = find_readme(entries);
        let license = self
            .license
            .as_ref()
            .and_then(|license| {
                license
                    .spdx_id
                    .clone()
                    .filter(|id| id != "NOASSERTION")
                    .or_else(|| license.name.clone())
            });
        let has_license = self.license.is_some() || license_file_present(entries);

        RepositoryMetadata {
            owner: self.owner.login,
            name: self.name,
            language: self.language.filter(|language| !language.trim().is_empty()),
            stars: self.stargazers_count,
            forks: self.forks_count,
            open_issues: self.open_issues_count,
            size_kb: self.size,
            created_at: self.created_at,
            updated_at: self.pushed_at.unwrap_or(self.updated_at),
            has_readme: readme.is_some(),
            readme_bytes: readme.map(|entry| entry.size).unwrap_or(0),
            has_license,
            license,
            tests: detect_tests(entries),
            description: self.description.unwrap_or_default(),
            topics: self.topics,
            directories: entries
                .iter()
                .filter(|entry| entry.is_dir())
                .map(|entry| entry.name.to_lowercase())
                .collect(),
            recent_commits,
            default_branch: self.default_branch.unwrap_or_else(|| "main".to_string()),
            has_wiki: self.has_wiki,
            has_issues: self.has_issues,
            archived: self.archived,
            html_url: self.html_url,
        }
    }
}
