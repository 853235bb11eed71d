use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreStatus {
    Completed,
    Error,
}

impl std::fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreStatus::Completed => write!(f, "completed"),
            ScoreStatus::Error => write!(f, "error"),
        }
    }
}

/// Raw metrics reported alongside every score, whichever rules fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub title_length: usize,
    pub description_length: usize,
    pub images_count: usize,
    pub links_count: usize,
}

/// Scored verdict on a single [`crate::AttributeRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Always within `0..=100`.
    pub score: u8,
    pub status: ScoreStatus,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub details: ScoreDetails,
}

impl ScoreReport {
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == ScoreStatus::Error
    }
}
