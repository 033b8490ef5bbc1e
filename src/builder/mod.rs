//! Builder API for declaring states, events and hooks.
//!
//! Every builder borrows the [`StateMachine`](crate::StateMachine) it was
//! obtained from, so all definitions live in that one value. Asking for a
//! state or event that already exists returns it for further configuration.
//!
//! # Example
//!
//! ```
//! use waypoint::core::{Context, Statable, TrackedState};
//! use waypoint::StateMachine;
//!
//! let mut machine: StateMachine<TrackedState> = StateMachine::new();
//! machine.initial("draft");
//! machine.state("checkout").enter(|_ctx, _order| Ok(()));
//! machine.state("paid");
//!
//! machine.event("checkout").to("checkout").from(["draft"]);
//! machine
//!     .event("pay")
//!     .to("paid")
//!     .from(["checkout"])
//!     .before(|_ctx, order| {
//!         anyhow::ensure!(order.state() == Some("checkout"), "not checked out");
//!         Ok(())
//!     });
//!
//! let ctx = Context::background();
//! let mut order = TrackedState::new();
//! machine.trigger(&ctx, "checkout", &mut order).unwrap();
//! machine.trigger(&ctx, "pay", &mut order).unwrap();
//! assert_eq!(order.state(), Some("paid"));
//! ```

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::DefinitionError;
pub use machine::StateBuilder;
pub use transition::{EventBuilder, RuleBuilder, TransitionBuilder};
