//! Answers and their evaluations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::question::GenerationSource;
use super::voice::VoiceSummary;
use crate::domain::foundation::{QuestionId, Score, Timestamp};

/// Canonical scoring dimensions requested from the evaluator.
pub const DIMENSIONS: [&str; 5] = ["relevance", "completeness", "depth", "clarity", "specificity"];

/// Per-dimension sub-scores, keyed by dimension name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionScores(BTreeMap<String, f64>);

impl DimensionScores {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Every canonical dimension set to the same value.
    pub fn uniform(value: f64) -> Self {
        Self(DIMENSIONS.iter().map(|d| (d.to_string(), value)).collect())
    }

    /// The neutral score set used when evaluation is unavailable.
    pub fn neutral() -> Self {
        Self::uniform(Score::NEUTRAL.value())
    }

    pub fn with(mut self, dimension: impl Into<String>, value: f64) -> Self {
        self.0.insert(dimension.into(), value);
        self
    }

    pub fn insert(&mut self, dimension: impl Into<String>, value: f64) {
        self.0.insert(dimension.into(), value);
    }

    pub fn get(&self, dimension: &str) -> Option<f64> {
        self.0.get(dimension).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for DimensionScores {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// What the evaluator returns for one answer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Evaluation {
    pub dimension_scores: DimensionScores,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub follow_up_suggestions: Vec<String>,
}

impl Evaluation {
    pub fn new(dimension_scores: DimensionScores) -> Self {
        Self {
            dimension_scores,
            ..Default::default()
        }
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = feedback.into();
        self
    }

    pub fn with_strengths(mut self, strengths: Vec<String>) -> Self {
        self.strengths = strengths;
        self
    }

    pub fn with_weaknesses(mut self, weaknesses: Vec<String>) -> Self {
        self.weaknesses = weaknesses;
        self
    }
}

/// A scored answer. Immutable once appended to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub phase_index: usize,
    pub text: String,
    pub dimension_scores: DimensionScores,
    pub weighted_score: Score,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub feedback: String,
    pub follow_up_suggestions: Vec<String>,
    pub voice: Option<VoiceSummary>,
    pub evaluation_source: GenerationSource,
    pub answered_at: Timestamp,
}
