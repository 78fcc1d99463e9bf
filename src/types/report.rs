use super::metadata::RepositoryInfo;
use super::scoring::{Criterion, Level, Points, Status};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionResult {
    #[serde(rename = "id")]
    pub criterion: Criterion,
    pub name: String,
    pub score: Points,
    pub max: Points,
    pub status: Status,
    pub message: String,
}

impl CriterionResult {
    /// Builds a result, clamping `score` to the criterion maximum and
    /// deriving the status from the awarded share.
    pub fn new(criterion: Criterion, score: Points, message: impl Into<String>) -> Self {
        let max = criterion.max_points();
        let score = score.min(max);
        Self {
            criterion,
            name: criterion.display_name().to_string(),
            score,
            max,
            status: Status::classify(score, max),
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn shortfall(&self) -> Points {
        self.max - self.score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapItem {
    pub priority: Priority,
    pub criterion: Criterion,
    pub title: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: Points,
    pub level: Level,
    pub breakdown: Vec<CriterionResult>,
    pub summary: String,
    pub roadmap: Vec<RoadmapItem>,
}

impl AnalysisResult {
    pub fn sort_roadmap(&mut self) {
        self.roadmap
            .sort_by_key(|item| (item.priority, item.criterion.rank()));
    }
}

/// Body returned by the analysis endpoint on success.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub status: &'static str,
    pub analysis: AnalysisResult,
    pub repository_info: RepositoryInfo,
}

impl AnalysisResponse {
    pub fn success(analysis: AnalysisResult, repository_info: RepositoryInfo) -> Self {
        Self {
            status: "success",
            analysis,
            repository_info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: "error",
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criterion_result_clamps_score_to_max() {
        let result = CriterionResult::new(Criterion::Structure, 42, "oversized");
        assert_eq!(result.score, 10);
        assert_eq!(result.status, Status::Good);
        assert_eq!(result.shortfall(), 0);
    }

    #[test]
    fn roadmap_sorts_by_priority_then_criterion_order() {
        let item = |priority, criterion| RoadmapItem {
            priority,
            criterion,
            title: String::new(),
            steps: Vec::new(),
        };
        let mut result = AnalysisResult {
            score: 0,
            level: Level::Beginner,
            breakdown: Vec::new(),
            summary: String::new(),
            roadmap: vec![
                item(Priority::Low, Criterion::Documentation),
                item(Priority::High, Criterion::Structure),
                item(Priority::High, Criterion::Testing),
                item(Priority::Medium, Criterion::Community),
            ],
        };

        result.sort_roadmap();
        let order: Vec<_> = result
            .roadmap
            .iter()
            .map(|item| (item.priority, item.criterion))
            .collect();
        assert_eq!(
            order,
            vec![
                (Priority::High, Criterion::Testing),
                (Priority::High, Criterion::Structure),
                (Priority::Medium, Criterion::Community),
                (Priority::Low, Criterion::Documentation),
            ]
        );
    }

    #[test]
    fn priority_serializes_uppercase() {
        let rendered = serde_json::to_string(&Priority::Medium).expect("priority should serialize");
        assert_eq!(rendered, "\"MEDIUM\"");
    }
}
