//! Validation of state machine definitions.
//!
//! Registration is never sealed and never fails, so definition mistakes
//! (an event pointing at a state that was never declared, two rules of one
//! event claiming the same source state) are caught by an explicit check
//! instead. The check uses Stillwater's `Validation` to report every
//! violation in one pass rather than stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use waypoint::builder::DefinitionError;
//! use waypoint::core::TrackedState;
//! use waypoint::StateMachine;
//!
//! let mut machine: StateMachine<TrackedState> = StateMachine::new();
//! machine.initial("draft");
//! machine.event("checkout").to("checkout").from(["draft"]);
//!
//! let errors = machine.validated().unwrap_err();
//! assert_eq!(
//!     errors,
//!     vec![DefinitionError::UndeclaredState {
//!         event: "checkout".to_string(),
//!         state: "checkout".to_string(),
//!     }]
//! );
//! ```

pub mod rules;

pub use rules::DefinitionCheck;
