use super::community::group_thousands;
use crate::types::metadata::RepositoryMetadata;
use crate::types::report::CriterionResult;
use crate::types::scoring::{Level, Points, Status, TOTAL_POINTS};

/// Builds the mentor-style summary paragraph. Output depends only on the
/// inputs, so identical analyses produce identical text.
pub fn summary(
    metadata: &RepositoryMetadata,
    score: Points,
    level: Level,
    breakdown: &[CriterionResult],
) -> String {
    let name = &metadata.name;
    let mut parts = vec![opening(name, &metadata.owner, score, level)];

    if let (Some(strongest), Some(weakest)) = (strongest(breakdown), weakest(breakdown)) {
        parts.push(format!(
            "Its strongest area is {}, scoring {}/{}.",
            strongest.name, strongest.score, strongest.max
        ));
        if weakest.status != Status::Good {
            parts.push(format!(
                "The main area for improvement is {}.",
                weakest.name
            ));
        }
    }

    let missing: Vec<&str> = breakdown
        .iter()
        .filter(|result| result.status == Status::Missing)
        .map(|result| result.name.as_str())
        .collect();
    if !missing.is_empty() {
        parts.push(format!("Not yet in place: {}.", missing.join(", ")));
    }

    if let Some(tip) = metadata.language.as_deref().and_then(language_tip) {
        parts.push(tip.to_string());
    }

    if metadata.stars > 1000 {
        parts.push(format!(
            "With {} stars, the project shows significant community interest.",
            group_thousands(metadata.stars)
        ));
    } else if metadata.stars > 100 {
        parts.push(format!(
            "The project has gained traction with {} stars.",
            group_thousands(metadata.stars)
        ));
    }

    parts.push(closing(level).to_string());
    parts.join(" ")
}

fn opening(name: &str, owner: &str, score: Points, level: Level) -> String {
    if score == TOTAL_POINTS {
        return format!("Outstanding! {name} by {owner} meets every quality criterion.");
    }
    match level {
        Level::Advanced => format!(
            "Impressive work! {name} by {owner} demonstrates professional-grade development practices."
        ),
        Level::Intermediate => {
            format!("Solid foundation! {name} by {owner} has the essentials in place.")
        }
        Level::Beginner => {
            format!("Getting started! {name} by {owner} is at the beginning of its journey.")
        }
    }
}

fn closing(level: Level) -> &'static str {
    match level {
        Level::Advanced => "This repository could serve as a model for other open-source projects.",
        Level::Intermediate => {
            "With some targeted improvements, this could become an exemplary repository."
        }
        Level::Beginner => "Use the roadmap below as a guide for the next steps.",
    }
}

fn language_tip(language: &str) -> Option<&'static str> {
    match language {
        "JavaScript" => Some(
            "As a JavaScript project, consider ESLint for consistency and Prettier for formatting.",
        ),
        "TypeScript" => {
            Some("TypeScript offers strong type safety; enable strict mode to get the most from it.")
        }
        "Python" => Some("For Python, type hints and an auto-formatter such as Black pay off quickly."),
        "Rust" => Some("For Rust, run clippy and rustfmt in CI to keep the codebase idiomatic."),
        "Go" => Some("For Go, gofmt and go vet in CI keep the codebase consistent."),
        _ => None,
    }
}

// Ratio comparison by cross-multiplication; ties keep the earliest criterion.
fn ratio_gt(a: &CriterionResult, b: &CriterionResult) -> bool {
    a.score * b.max > b.score * a.max
}

fn strongest(breakdown: &[CriterionResult]) -> Option<&CriterionResult> {
    breakdown.iter().fold(None, |best, candidate| match best {
        Some(best) if !ratio_gt(candidate, best) => Some(best),
        _ => Some(candidate),
    })
}

fn weakest(breakdown: &[CriterionResult]) -> Option<&CriterionResult> {
    breakdown.iter().fold(None, |worst, candidate| match worst {
        Some(worst) if !ratio_gt(worst, candidate) => Some(worst),
        _ => Some(candidate),
    })
}
