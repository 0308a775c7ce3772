//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `interview` - Interview session state machine, scoring and reporting

pub mod foundation;
pub mod interview;
