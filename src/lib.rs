//! Interview Engine - AI-driven interview sessions
//!
//! Walks a candidate through an ordered plan of interview phases, asking
//! generated questions, scoring each answer, deciding between follow-ups and
//! progression, and producing a weighted final report. External AI services
//! (question generation, answer evaluation, transcription, narrative) sit
//! behind ports and fail open to fixed defaults.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
