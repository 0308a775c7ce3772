//! Final interview report and its assembly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::candidate::CandidateProfile;
use super::decision::CompletionReason;
use super::phase_record::PhaseRecord;
use super::question::GenerationSource;
use super::scoring::{PhaseWeights, ScoreAggregator};
use super::state::SessionState;
use crate::domain::foundation::{InterviewId, Timestamp};

/// How many strengths and weaknesses the report lists.
pub const MAX_HIGHLIGHTS: usize = 5;

/// How many question/answer pairs are summarized for the narrator.
pub const NARRATIVE_SAMPLE_ANSWERS: usize = 3;

/// Hiring recommendation derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    StronglyRecommend,
    Recommend,
    Consider,
    Reserved,
    NotRecommend,
}

impl RecommendationTier {
    /// Maps an overall score onto a tier using fixed thresholds.
    pub fn from_score(score: f64) -> Self {
        if score >= 8.5 {
            RecommendationTier::StronglyRecommend
        } else if score >= 7.0 {
            RecommendationTier::Recommend
        } else if score >= 5.5 {
            RecommendationTier::Consider
        } else if score >= 4.0 {
            RecommendationTier::Reserved
        } else {
            RecommendationTier::NotRecommend
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecommendationTier::StronglyRecommend => "strongly recommend",
            RecommendationTier::Recommend => "recommend",
            RecommendationTier::Consider => "consider",
            RecommendationTier::Reserved => "reserved",
            RecommendationTier::NotRecommend => "not recommend",
        }
    }
}

impl fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structured numbers handed to the narrator and embedded in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportStats {
    pub overall_score: f64,
    pub recommendation: RecommendationTier,
    pub average_answer_score: f64,
    pub questions_asked: usize,
    pub questions_answered: usize,
    pub follow_ups: usize,
    pub phases_completed: usize,
    pub total_phases: usize,
    pub duration_seconds: i64,
    pub phase_summaries: Vec<PhaseRecord>,
}

/// The final evaluation of a completed interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewReport {
    pub interview_id: InterviewId,
    pub candidate: CandidateProfile,
    pub interview_date: String,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub completion_reason: CompletionReason,
    pub stats: ReportStats,
    pub top_strengths: Vec<String>,
    pub top_weaknesses: Vec<String>,
    pub fallback_count: usize,
    pub narrative: String,
    pub narrative_source: GenerationSource,
}

impl InterviewReport {
    pub fn overall_score(&self) -> f64 {
        self.stats.overall_score
    }

    pub fn recommendation(&self) -> RecommendationTier {
        self.stats.recommendation
    }
}

/// Builds reports from session history.
pub struct ReportAssembler;

impl ReportAssembler {
    /// Computes the structured statistics for a session.
    pub fn stats(state: &SessionState, weights: &PhaseWeights, now: Timestamp) -> ReportStats {
        let overall_score =
            ScoreAggregator::overall_score(state.phase_records(), state.answers(), weights);
        let follow_ups = state.questions().iter().filter(|q| q.is_follow_up()).count();
        let duration_seconds = state
            .elapsed(now)
            .map(|d| d.num_seconds().max(0))
            .unwrap_or(0);

        ReportStats {
            overall_score,
            recommendation: RecommendationTier::from_score(overall_score),
            average_answer_score: state.average_answer_score(),
            questions_asked: state.questions().len(),
            questions_answered: state.answers().len(),
            follow_ups,
            phases_completed: state.phase_records().len(),
            total_phases: state.plan().len(),
            duration_seconds,
            phase_summaries: state.phase_records().to_vec(),
        }
    }

    /// Combines stats, narrative and session details into the report.
    pub fn assemble(
        state: &SessionState,
        stats: ReportStats,
        narrative: String,
        narrative_source: GenerationSource,
    ) -> InterviewReport {
        let date_basis = state
            .started_at()
            .copied()
            .unwrap_or_else(|| *state.created_at());

        InterviewReport {
            interview_id: *state.id(),
            candidate: state.candidate().clone(),
            interview_date: date_basis.date_string(),
            started_at: state.started_at().copied(),
            completed_at: state.completed_at().copied(),
            completion_reason: state
                .completion_reason()
                .unwrap_or(CompletionReason::EndedByCaller),
            stats,
            top_strengths: top_mentions(state.answers().iter().flat_map(|a| a.strengths.iter())),
            top_weaknesses: top_mentions(state.answers().iter().flat_map(|a| a.weaknesses.iter())),
            fallback_count: state.fallbacks().len(),
            narrative,
            narrative_source,
        }
    }

    /// Short "question / answer / score" digests of the first answers.
    pub fn answer_highlights(state: &SessionState, limit: usize) -> Vec<String> {
        state
            .questions()
            .iter()
            .zip(state.answers())
            .take(limit)
            .enumerate()
            .map(|(i, (question, answer))| {
                format!(
                    "Question {}: {}\nAnswer: {}\nScore: {}",
                    i + 1,
                    clip(&question.text, 50),
                    clip(&answer.text, 100),
                    answer.weighted_score
                )
            })
            .collect()
    }
}

fn clip(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Most frequent entries, ties broken by first appearance.
fn top_mentions<'a>(items: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for item in items {
        let key = item.trim();
        if key.is_empty() {
            continue;
        }
        let count = counts.entry(key).or_insert(0);
        if *count == 0 {
            order.push(key);
        }
        *count += 1;
    }

    let mut ranked: Vec<(usize, &str)> = order.into_iter().enumerate().collect();
    ranked.sort_by(|(ia, a), (ib, b)| counts[b].cmp(&counts[a]).then(ia.cmp(ib)));
    ranked
        .into_iter()
        .take(MAX_HIGHLIGHTS)
        .map(|(_, k)| k.to_string())
        .collect()
}
