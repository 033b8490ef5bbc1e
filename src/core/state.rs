//! The `Statable` capability and an embeddable implementation of it.
//!
//! The engine never owns the entities it drives. It only reads and writes
//! the current state and the last recorded change through this trait, so any
//! caller-defined type can be driven by composition.

use super::change::StateChange;
use serde::{Deserialize, Serialize};

/// Minimal contract an entity must satisfy to be driven by a state machine.
///
/// `state()` returning `None` means the entity has never been placed in a
/// state; the machine then treats it as being in its initial state.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Statable, StateChange};
///
/// struct Ticket {
///     status: Option<String>,
/// }
///
/// impl Statable for Ticket {
///     fn state(&self) -> Option<&str> {
///         self.status.as_deref()
///     }
///
///     fn set_state(&mut self, state: Option<String>) {
///         self.status = state;
///     }
/// }
///
/// let mut ticket = Ticket { status: None };
/// ticket.set_state(Some("open".to_string()));
/// assert_eq!(ticket.state(), Some("open"));
/// assert!(ticket.last_state_change().is_none());
/// ```
pub trait Statable {
    /// Current state name, or `None` if unset.
    fn state(&self) -> Option<&str>;

    /// Overwrite the current state.
    fn set_state(&mut self, state: Option<String>);

    /// The most recent successful transition, if the entity tracks one.
    ///
    /// Default implementation returns `None`.
    fn last_state_change(&self) -> Option<&StateChange> {
        None
    }

    /// Store the bookkeeping for a successful transition.
    ///
    /// Default implementation discards it.
    fn record_state_change(&mut self, _change: StateChange) {}
}

/// Embeddable state holder that implements [`Statable`] in full.
///
/// Entities usually carry one of these as a field and forward to it with
/// the [`statable!`](crate::statable) macro.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackedState {
    state: Option<String>,
    last_change: Option<StateChange>,
}

impl TrackedState {
    /// Create an unset state holder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a holder already placed in `state`.
    pub fn starting_at(state: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            last_change: None,
        }
    }

    /// Whether a state has ever been assigned.
    pub fn is_set(&self) -> bool {
        self.state.is_some()
    }
}

impl Statable for TrackedState {
    fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    fn set_state(&mut self, state: Option<String>) {
        self.state = state;
    }

    fn last_state_change(&self) -> Option<&StateChange> {
        self.last_change.as_ref()
    }

    fn record_state_change(&mut self, change: StateChange) {
        self.last_change = Some(change);
    }
}
