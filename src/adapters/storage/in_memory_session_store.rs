//! In-Memory Session Store Adapter
//!
//! Holds live interview sessions in a map keyed by interview id. Each entry
//! remembers when it was last looked up so idle sessions can be evicted.

use async_trait::async_trait;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::{InterviewId, Timestamp};
use crate::domain::interview::SessionState;
use crate::ports::{Clock, SessionStore, SharedSession, StoreError};

#[derive(Debug)]
struct Entry {
    session: SharedSession,
    last_used: Timestamp,
}

/// In-memory registry of live sessions
#[derive(Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<InterviewId, Entry>>>,
    clock: Arc<dyn Clock>,
}

impl InMemorySessionStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Clear all sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, state: SessionState) -> Result<SharedSession, StoreError> {
        let id = *state.id();
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&id) {
            return Err(StoreError::AlreadyExists(id));
        }

        let session = Arc::new(Mutex::new(state));
        sessions.insert(
            id,
            Entry {
                session: Arc::clone(&session),
                last_used: self.clock.now(),
            },
        );
        Ok(session)
    }

    async fn get(&self, id: &InterviewId) -> Result<SharedSession, StoreError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(id).ok_or(StoreError::NotFound(*id))?;
        entry.last_used = self.clock.now();
        Ok(Arc::clone(&entry.session))
    }

    async fn evict(&self, id: &InterviewId) -> Result<(), StoreError> {
        self.sessions
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(*id))
    }

    async fn evict_idle(&self, idle_ttl: Duration, now: Timestamp) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        // A session whose lock is held is mid-operation, never idle.
        sessions.retain(|_, entry| {
            now.duration_since(&entry.last_used) <= idle_ttl || entry.session.try_lock().is_err()
        });
        before - sessions.len()
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
