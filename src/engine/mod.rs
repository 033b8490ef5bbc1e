//! Transition resolution and the transactional hook pipeline.
//!
//! # Key Concepts
//!
//! - **Resolution**: an event name plus the entity's effective state select
//!   the first matching rule of that event
//! - **Pipeline**: Before, Exit, commit, Enter, After, strictly in order
//! - **Rollback**: a failure after the commit restores the entity's prior
//!   state; hook side effects are left as they are

mod error;
mod machine;
mod transition;

pub use error::TriggerError;
pub use machine::StateMachine;
pub use transition::{EventDefinition, StateDefinition, TransitionRule};
