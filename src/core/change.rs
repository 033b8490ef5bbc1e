//! Bookkeeping for the most recent state transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Record of a single committed transition.
///
/// Only the latest one is kept per entity; the engine does not maintain a
/// history.
///
/// # Example
///
/// ```rust
/// use waypoint::core::StateChange;
/// use chrono::Utc;
///
/// let change = StateChange {
///     event: "checkout".to_string(),
///     from: "draft".to_string(),
///     to: "checkout".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert!(!change.is_self_loop());
/// assert_eq!(change.to_string(), "checkout: draft -> checkout");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateChange {
    /// The event that caused the transition
    pub event: String,
    /// The effective state before the transition
    pub from: String,
    /// The state the entity moved into
    pub to: String,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

impl StateChange {
    /// Create a record stamped with the current time.
    pub fn now(event: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            from: from.into(),
            to: to.into(),
            timestamp: Utc::now(),
        }
    }

    /// Whether the transition left the entity in the state it started from.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.event, self.from, self.to)
    }
}
