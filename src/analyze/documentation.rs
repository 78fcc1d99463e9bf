use crate::types::metadata::RepositoryMetadata;
use crate::types::report::CriterionResult;
use crate::types::scoring::{Criterion, Points, Status};

/// README size from which it counts as substantive.
pub const SUBSTANTIVE_README_BYTES: u64 = 1500;
/// Trimmed description length from which it counts as non-trivial.
pub const DESCRIPTIVE_CHARS: usize = 20;
/// Most a repository without a README can earn here.
pub const NO_README_CAP: Points = 2;

pub fn documentation_score(metadata: &RepositoryMetadata) -> CriterionResult {
    let mut score = 0;
    let mut notes = Vec::new();

    if metadata.has_readme {
        score += 10;
        if metadata.readme_bytes >= SUBSTANTIVE_README_BYTES {
            score += 5;
            notes.push("detailed README");
        } else {
            notes.push("README is brief");
        }
    } else {
        notes.push("no README");
    }

    let description = metadata.description.trim();
    if description.chars().count() >= DESCRIPTIVE_CHARS {
        score += 4;
        notes.push("clear description");
    } else if !description.is_empty() {
        score += 2;
        notes.push("short description");
    } else {
        notes.push("no description");
    }

    if metadata.has_license {
        score += 4;
        notes.push("licensed");
    } else {
        notes.push("no license");
    }

    if !metadata.topics.is_empty() {
        score += 2;
    } else {
        notes.push("no topics");
    }

    if !metadata.has_readme {
        return CriterionResult::new(
            Criterion::Documentation,
            score.min(NO_README_CAP),
            notes.join(", "),
        )
        .with_status(Status::Missing);
    }

    let result = CriterionResult::new(Criterion::Documentation, score, notes.join(", "));
    if metadata.readme_bytes < SUBSTANTIVE_README_BYTES {
        result.with_status(Status::NeedsWork)
    } else {
        result
    }
}
