use crate::types::metadata::{RepositoryInfo, RepositoryMetadata};
use crate::types::report::{AnalysisResponse, AnalysisResult};

/// Same document the HTTP endpoint returns on success.
pub fn to_json(
    metadata: &RepositoryMetadata,
    analysis: &AnalysisResult,
) -> Result<String, serde_json::Error> {
    let response = AnalysisResponse::success(analysis.clone(), RepositoryInfo::from(metadata));
    serde_json::to_string_pretty(&response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;
    use crate::analyze::fixtures::{abandoned_repo, now};

    #[test]
    fn json_report_matches_endpoint_shape() {
        let metadata = abandoned_repo();
        let analysis = analyze(&metadata, now());

        let rendered = to_json(&metadata, &analysis).expect("json should serialize");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("json should parse");
        assert_eq!(value["status"], "success");
        assert_eq!(value["analysis"]["score"], analysis.score);
        assert_eq!(value["analysis"]["level"], "Beginner");
        assert_eq!(value["analysis"]["roadmap"][0]["priority"], "HIGH");
        assert_eq!(value["analysis"]["breakdown"][0]["id"], "documentation");
        assert!(value["repository_info"]["language"].is_null());
    }
}
