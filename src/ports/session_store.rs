//! Session Store Port - registry of live interview sessions.
//!
//! Replaces a process-wide map of sessions with an injected capability:
//! insert, look up, evict. Each session sits behind its own async mutex, so
//! operations on one interview are serialized while distinct interviews run
//! in parallel.

use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::{InterviewId, Timestamp};
use crate::domain::interview::SessionState;

/// A session shared between requests; lock it for every operation.
pub type SharedSession = Arc<Mutex<SessionState>>;

/// Errors from the session registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Interview not found: {0}")]
    NotFound(InterviewId),

    #[error("Interview already registered: {0}")]
    AlreadyExists(InterviewId),
}

/// Port for the session registry.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Registers a new session and returns its shared handle.
    ///
    /// # Errors
    /// Returns `StoreError::AlreadyExists` if the id is taken
    async fn insert(&self, state: SessionState) -> Result<SharedSession, StoreError>;

    /// Looks up a session and marks it as recently used.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if no session has this id
    async fn get(&self, id: &InterviewId) -> Result<SharedSession, StoreError>;

    /// Removes a session.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if no session has this id
    async fn evict(&self, id: &InterviewId) -> Result<(), StoreError>;

    /// Removes sessions untouched for longer than `idle_ttl`.
    /// Returns how many were evicted.
    async fn evict_idle(&self, idle_ttl: Duration, now: Timestamp) -> usize;

    /// Number of live sessions.
    async fn len(&self) -> usize;
}
