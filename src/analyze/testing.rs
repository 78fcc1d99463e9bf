use crate::types::metadata::{RepositoryMetadata, TestEvidence};
use crate::types::report::CriterionResult;
use crate::types::scoring::Criterion;

pub fn testing_score(metadata: &RepositoryMetadata) -> CriterionResult {
    let (score, message) = match metadata.tests {
        TestEvidence::Directory => (20, "Test directory found"),
        TestEvidence::Files => (14, "Test files or framework config found, but no test directory"),
        TestEvidence::None => (0, "No test structure found"),
    };
    CriterionResult::new(Criterion::Testing, score, message)
}
