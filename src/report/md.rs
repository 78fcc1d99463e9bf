use crate::types::metadata::RepositoryMetadata;
use crate::types::report::AnalysisResult;

pub fn to_markdown(metadata: &RepositoryMetadata, analysis: &AnalysisResult) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {} Quality Report\n\n", metadata.full_name()));
    output.push_str(&format!(
        "Overall score: {}/100 ({})\n\n",
        analysis.score,
        analysis.level.as_str()
    ));

    output.push_str("## Breakdown\n\n");
    for result in &analysis.breakdown {
        output.push_str(&format!(
            "- {}: {}/{} [{}] {}\n",
            result.name,
            result.score,
            result.max,
            result.status.as_str(),
            result.message
        ));
    }
    output.push('\n');

    output.push_str("## Summary\n\n");
    output.push_str(&analysis.summary);
    output.push_str("\n\n");

    output.push_str("## Roadmap\n\n");
    if analysis.roadmap.is_empty() {
        output.push_str("- none, every criterion is in good shape\n");
    } else {
        for item in &analysis.roadmap {
            output.push_str(&format!("### [{}] {}\n\n", item.priority.as_str(), item.title));
            for (index, step) in item.steps.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", index + 1, step));
            }
            output.push('\n');
        }
    }

    output.push_str("## Repository\n\n");
    output.push_str(&format!(
        "- language: {}\n- stars: {}\n- forks: {}\n- open issues: {}\n- license: {}\n- last push: {}\n- recent commits: {}\n",
        metadata.language.as_deref().unwrap_or("not specified"),
        metadata.stars,
        metadata.forks,
        metadata.open_issues,
        metadata.license.as_deref().unwrap_or("none"),
        metadata.updated_at.format("%Y-%m-%d"),
        metadata.recent_commits,
    ));

    output
}
