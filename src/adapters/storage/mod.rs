//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Live sessions in a process-local map
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemorySessionStore;
//!
//! let store = InMemorySessionStore::new(Arc::new(SystemClock));
//! let session = store.insert(state).await?;
//! ```

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
