//! Clock Port - source of the current time.

use crate::domain::foundation::Timestamp;

/// Supplies "now" to the engine so elapsed-time limits can be tested.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
