use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::error::GradeError;

static REPO_URL: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

fn repo_url_pattern() -> Result<&'static Regex, GradeError> {
    REPO_URL
        .get_or_init(|| {
            Regex::new(
                r"^https://(?:www\.)?github\.com/([A-Za-z0-9](?:[A-Za-z0-9-]{0,38}))/([A-Za-z0-9._-]+?)(?:\.git)?/?(?:/[^?#]*)?(?:[?#].*)?$",
            )
        })
        .as_ref()
        .map_err(|e| GradeError::Pattern(e.clone()))
}

/// Owner and name identifying one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parses `https://github.com/<owner>/<name>` with an optional `www.`,
/// `.git` suffix, trailing slash, sub-path, query or fragment.
pub fn parse_repo_url(input: &str) -> Result<RepoRef, GradeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(GradeError::InvalidUrl(
            "please provide a GitHub repository URL".to_string(),
        ));
    }

    let captures = repo_url_pattern()?.captures(trimmed).ok_or_else(|| {
        GradeError::InvalidUrl(format!(
            "expected https://github.com/<owner>/<name>, got {trimmed}"
        ))
    })?;

    let owner = captures[1].to_string();
    let name = captures[2].to_string();
    if name == "." || name == ".." || owner.ends_with('-') {
        return Err(GradeError::InvalidUrl(format!(
            "not a repository path: {owner}/{name}"
        )));
    }

    Ok(RepoRef { owner, name })
}
