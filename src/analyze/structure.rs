use crate::types::metadata::RepositoryMetadata;
use crate::types::report::CriterionResult;
use crate::types::scoring::{Criterion, Points};

/// Below this size a repository without a detected language is treated as
/// an empty shell.
pub const PATHOLOGICAL_SIZE_KB: u64 = 10;

/// Root directories that signal a deliberate project layout.
pub const KEY_DIRECTORIES: [&str; 12] = [
    "src", "lib", "app", "cmd", "pkg", "crates", "packages", "public", "docs", "config",
    "assets", "static",
];

pub fn structure_score(metadata: &RepositoryMetadata) -> CriterionResult {
    let language = metadata
        .language
        .as_deref()
        .map(str::trim)
        .filter(|language| !language.is_empty());

    if language.is_none() && metadata.size_kb < PATHOLOGICAL_SIZE_KB {
        return CriterionResult::new(
            Criterion::Structure,
            0,
            format!(
                "Nearly empty repository ({} KB, no language detected)",
                metadata.size_kb
            ),
        );
    }

    let mut score = 0;
    let mut notes = Vec::new();
    match language {
        Some(language) => {
            score += 3;
            notes.push(format!("primary language {language}"));
        }
        None => notes.push("no primary language detected".to_string()),
    }

    let (size_points, size_note) = match metadata.size_kb {
        s if s >= 100 => (4, "substantial codebase"),
        s if s >= 10 => (3, "moderate codebase"),
        s if s >= 1 => (1, "small codebase"),
        _ => (0, "empty codebase"),
    };
    score += size_points;
    notes.push(format!("{size_note} ({} KB)", metadata.size_kb));

    let (layout_points, layout_note) = layout(&metadata.directories);
    score += layout_points;
    notes.push(layout_note);

    CriterionResult::new(Criterion::Structure, score, notes.join(", "))
}

fn layout(directories: &[String]) -> (Points, String) {
    let found: Vec<&str> = KEY_DIRECTORIES
        .iter()
        .copied()
        .filter(|key| {
            directories
                .iter()
                .any(|directory| directory.eq_ignore_ascii_case(key))
        })
        .collect();

    match found.len() {
        0 => (0, "no standard folders".to_string()),
        1 => (2, format!("one standard folder ({})", found[0])),
        _ => (3, format!("standard folders ({})", found.join(", "))),
    }
}
