//! Score Aggregator - combines sub-scores into answer, phase and session scores.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::answer::{Answer, DimensionScores};
use super::errors::InterviewError;
use super::phase::InterviewPhase;
use super::phase_record::PhaseRecord;
use crate::domain::foundation::Score;

/// Weight applied to phases missing from the weight table.
pub const DEFAULT_PHASE_WEIGHT: f64 = 0.5;

/// Per-phase weights for the overall score.
///
/// Technical and scenario rounds dominate; the icebreaker and closing
/// rounds barely move the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseWeights {
    weights: BTreeMap<InterviewPhase, f64>,
    default_weight: f64,
}

impl PhaseWeights {
    /// Creates a table with no explicit entries.
    pub fn uniform(default_weight: f64) -> Self {
        Self {
            weights: BTreeMap::new(),
            default_weight,
        }
    }

    pub fn with_weight(mut self, phase: InterviewPhase, weight: f64) -> Self {
        self.weights.insert(phase, weight);
        self
    }

    pub fn with_default_weight(mut self, default_weight: f64) -> Self {
        self.default_weight = default_weight;
        self
    }

    /// Weight for `phase`, falling back to the default weight.
    pub fn weight_for(&self, phase: InterviewPhase) -> f64 {
        self.weights
            .get(&phase)
            .copied()
            .unwrap_or(self.default_weight)
    }

    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }
}

impl Default for PhaseWeights {
    fn default() -> Self {
        Self::uniform(DEFAULT_PHASE_WEIGHT)
            .with_weight(InterviewPhase::Introduction, 0.1)
            .with_weight(InterviewPhase::Technical, 0.5)
            .with_weight(InterviewPhase::Behavioral, 0.3)
            .with_weight(InterviewPhase::Scenario, 0.8)
            .with_weight(InterviewPhase::Closing, 0.1)
    }
}

/// Pure scoring functions.
pub struct ScoreAggregator;

impl ScoreAggregator {
    /// Straight mean of the dimension scores.
    ///
    /// # Errors
    /// - `EmptyScoreSet` when no dimensions were scored
    /// - `InvalidScoreRange` when any dimension lies outside [0, 10]
    pub fn weighted_answer_score(scores: &DimensionScores) -> Result<Score, InterviewError> {
        if scores.is_empty() {
            return Err(InterviewError::EmptyScoreSet);
        }

        let mut sum = 0.0;
        for (dimension, value) in scores.iter() {
            Score::try_named(dimension, value)
                .map_err(|_| InterviewError::invalid_score(dimension, value))?;
            sum += value;
        }

        Ok(Score::clamped(sum / scores.len() as f64))
    }

    /// Mean weighted score of `answers`; 0.0 when empty.
    pub fn phase_average<'a, I>(answers: I) -> f64
    where
        I: IntoIterator<Item = &'a Answer>,
    {
        Self::mean(answers.into_iter().map(|a| a.weighted_score.value()))
    }

    /// Phase-weighted mean of the record averages.
    ///
    /// # Edge Cases
    /// - No records (or zero total weight): unweighted mean over `answers`
    /// - No answers either: 0.0
    pub fn overall_score(records: &[PhaseRecord], answers: &[Answer], weights: &PhaseWeights) -> f64 {
        let (weighted_sum, total_weight) =
            records.iter().fold((0.0, 0.0), |(sum, total), record| {
                let w = weights.weight_for(record.phase);
                (sum + record.average_score * w, total + w)
            });

        let overall = if total_weight > 0.0 {
            weighted_sum / total_weight
        } else {
            Self::phase_average(answers)
        };

        Score::clamped(overall).value()
    }

    fn mean(values: impl Iterator<Item = f64>) -> f64 {
        let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}
