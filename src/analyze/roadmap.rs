use crate::types::report::{CriterionResult, Priority, RoadmapItem};
use crate::types::scoring::{Criterion, Status};

/// One item per criterion that is not yet good.
pub fn roadmap(breakdown: &[CriterionResult]) -> Vec<RoadmapItem> {
    breakdown
        .iter()
        .filter(|result| result.status != Status::Good)
        .map(|result| {
            let (title, steps) = guidance(result.criterion);
            RoadmapItem {
                priority: priority(result),
                criterion: result.criterion,
                title: title.to_string(),
                steps: steps.iter().map(|step| step.to_string()).collect(),
            }
        })
        .collect()
}

/// Missing documentation or tests are foundational; everything else is
/// ranked by how many points are left on the table.
pub fn priority(result: &CriterionResult) -> Priority {
    let foundational = matches!(
        (result.criterion, result.status),
        (Criterion::Documentation, Status::Missing) | (Criterion::Testing, Status::Missing)
    );
    match result.shortfall() {
        _ if foundational => Priority::High,
        gap if gap >= 10 => Priority::High,
        gap if gap >= 5 => Priority::Medium,
        _ => Priority::Low,
    }
}

fn guidance(criterion: Criterion) -> (&'static str, [&'static str; 4]) {
    match criterion {
        Criterion::Documentation => (
            "Create comprehensive documentation",
            [
                "Add a README.md that explains what the project does and why",
                "Include installation instructions and a quick-start example",
                "Write a one-line repository description and add topic tags",
                "Add a LICENSE file so others know how they may use the code",
            ],
        ),
        Criterion::Community => (
            "Grow community engagement",
            [
                "Share the project where its intended users gather",
                "Add a CONTRIBUTING.md guide and label good first issues",
                "Publish releases with changelogs so users can follow progress",
                "Showcase usage with screenshots, demos or examples",
            ],
        ),
        Criterion::Testing => (
            "Add a testing framework",
            [
                "Choose a test framework for the project's language",
                "Create a tests/ directory and cover the critical paths first",
                "Run the tests automatically in continuous integration",
                "Track test coverage and raise it over time",
            ],
        ),
        Criterion::Maintenance => (
            "Resume regular maintenance",
            [
                "Review and merge or close stale pull requests",
                "Commit in small, regular steps with descriptive messages",
                "Cut a release to signal that the project is alive",
                "State the maintenance status clearly in the README",
            ],
        ),
        Criterion::IssueHygiene => (
            "Triage the issue backlog",
            [
                "Enable the issue tracker if it is turned off",
                "Close duplicates and issues that are already resolved",
                "Label open issues by type and priority",
                "Add issue templates so new reports arrive complete",
            ],
        ),
        Criterion::Structure => (
            "Organize the project structure",
            [
                "Commit the project source code, not just scaffolding",
                "Lay out logical folders such as src/, tests/ and docs/",
                "Separate source code from configuration files",
                "Add a build manifest so the primary language is detected",
            ],
        ),
    }
}
