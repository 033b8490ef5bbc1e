//! Waypoint: declarative finite state machines with transactional hooks
//!
//! Callers declare named states, named events and per-event transition
//! rules, then drive any entity implementing [`Statable`] through them with
//! [`StateMachine::trigger`].
//!
//! # Core Concepts
//!
//! - **States**: named, with optional Enter/Exit hooks
//! - **Events**: named, ordered lists of rules mapping source states to one
//!   target, each rule with optional Before/After hooks
//! - **Trigger**: resolves the first matching rule and runs Before, Exit,
//!   commit, Enter, After; a late failure restores the previous state
//!
//! # Example
//!
//! ```rust
//! use waypoint::core::{Context, Statable, TrackedState};
//! use waypoint::{statable, StateMachine, TriggerError};
//!
//! struct Order {
//!     address: String,
//!     tracking: TrackedState,
//! }
//!
//! statable!(Order => tracking);
//!
//! let mut machine: StateMachine<Order> = StateMachine::new();
//! machine.initial("draft");
//! machine.state("checkout").enter(|_ctx, order| {
//!     order.address = "set on checkout".to_string();
//!     Ok(())
//! });
//! machine.state("paid");
//! machine.event("checkout").to("checkout").from(["draft"]);
//! machine.event("pay").to("paid").from(["checkout"]);
//!
//! let ctx = Context::background();
//! let mut order = Order { address: String::new(), tracking: TrackedState::new() };
//!
//! let err = machine.trigger(&ctx, "pay", &mut order).unwrap_err();
//! assert!(matches!(err, TriggerError::NoMatchingTransition { .. }));
//!
//! machine.trigger(&ctx, "checkout", &mut order).unwrap();
//! assert_eq!(order.state(), Some("checkout"));
//! assert_eq!(order.address, "set on checkout");
//! ```

pub mod builder;
pub mod core;
pub mod definition;
pub mod engine;
pub mod validation;

// Re-export commonly used types
pub use builder::DefinitionError;
pub use crate::core::{Context, Hook, HookSlot, Statable, StateChange, TrackedState};
pub use definition::MachineDefinition;
pub use engine::{StateMachine, TriggerError};
