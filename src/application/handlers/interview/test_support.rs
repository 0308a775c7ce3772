//! Shared fixtures for the interview handler tests.

use std::sync::Arc;

use crate::adapters::clock::SystemClock;
use crate::adapters::scripted::{
    ScriptedEvaluator, ScriptedNarrator, ScriptedQuestionGenerator, ScriptedTranscriber,
};
use crate::adapters::storage::InMemorySessionStore;
use crate::application::engine::{Collaborators, EngineSettings, InterviewEngine};
use crate::domain::interview::CandidateProfile;
use crate::ports::{SessionStore, Transcript};

pub(crate) struct Fixture {
    pub engine: Arc<InterviewEngine>,
    pub store: Arc<dyn SessionStore>,
}

pub(crate) fn fixture(score: f64) -> Fixture {
    let clock = Arc::new(SystemClock);
    let collaborators = Collaborators {
        questions: Arc::new(ScriptedQuestionGenerator::new()),
        evaluator: Arc::new(ScriptedEvaluator::scoring(score)),
        transcriber: Arc::new(ScriptedTranscriber::new(Transcript {
            text: "I led the migration to Rust".to_string(),
            duration_secs: Some(3.0),
        })),
        narrator: Arc::new(ScriptedNarrator::default()),
    };
    Fixture {
        engine: Arc::new(InterviewEngine::new(
            collaborators,
            clock.clone(),
            EngineSettings::default(),
        )),
        store: Arc::new(InMemorySessionStore::new(clock)),
    }
}

pub(crate) fn candidate() -> CandidateProfile {
    CandidateProfile::new("Ada Lovelace", 6, ["rust", "distributed systems"], "Senior Backend Engineer")
        .expect("valid candidate")
}
