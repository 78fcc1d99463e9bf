use serde::{Deserialize, Serialize};

pub type Points = u32;

/// Total of all criterion maxima.
pub const TOTAL_POINTS: Points = 100;

/// Scored dimensions in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Documentation,
    Community,
    Testing,
    Maintenance,
    IssueHygiene,
    Structure,
}

impl Criterion {
    pub const ALL: [Criterion; 6] = [
        Criterion::Documentation,
        Criterion::Community,
        Criterion::Testing,
        Criterion::Maintenance,
        Criterion::IssueHygiene,
        Criterion::Structure,
    ];

    pub fn max_points(self) -> Points {
        match self {
            Criterion::Documentation => 25,
            Criterion::Community => 20,
            Criterion::Testing => 20,
            Criterion::Maintenance => 15,
            Criterion::IssueHygiene => 10,
            Criterion::Structure => 10,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Criterion::Documentation => "Documentation",
            Criterion::Community => "Community Engagement",
            Criterion::Testing => "Testing Practices",
            Criterion::Maintenance => "Maintenance Activity",
            Criterion::IssueHygiene => "Issue Hygiene",
            Criterion::Structure => "Repository Structure",
        }
    }

    /// Position in [`Criterion::ALL`], used for stable ordering.
    pub fn rank(self) -> usize {
        Self::ALL
            .iter()
            .position(|criterion| *criterion == self)
            .unwrap_or(Self::ALL.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Good,
    NeedsWork,
    Missing,
}

impl Status {
    /// Zero points is missing, at least 80% of the maximum is good.
    pub fn classify(score: Points, max: Points) -> Self {
        if score == 0 {
            Status::Missing
        } else if score * 100 >= max * 80 {
            Status::Good
        } else {
            Status::NeedsWork
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Good => "good",
            Status::NeedsWork => "needs-work",
            Status::Missing => "missing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    /// 0-40 Beginner, 41-75 Intermediate, 76-100 Advanced.
    pub fn from_score(score: Points) -> Self {
        match score {
            0..=40 => Level::Beginner,
            41..=75 => Level::Intermediate,
            _ => Level::Advanced,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}
