//! Errors returned by [`StateMachine::trigger`](super::StateMachine::trigger).

use crate::core::HookSlot;
use thiserror::Error;

/// Errors that can occur while triggering an event.
///
/// Whatever the variant, the entity's tracked state is left exactly as it
/// was before the call.
#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("Event '{event}' is not registered")]
    UnknownEvent { event: String },

    #[error("Event '{event}' has no transition from state '{state}'")]
    NoMatchingTransition { event: String, state: String },

    #[error("Entity has no state and no initial state is declared (event '{event}')")]
    NoInitialState { event: String },

    #[error("{slot} hook failed during '{event}' ({from} -> {to}): {source}")]
    Hook {
        slot: HookSlot,
        event: String,
        from: String,
        to: String,
        #[source]
        source: anyhow::Error,
    },
}

impl TriggerError {
    /// The failing slot, for hook failures.
    pub fn hook_slot(&self) -> Option<HookSlot> {
        match self {
            Self::Hook { slot, .. } => Some(*slot),
            _ => None,
        }
    }

    /// Whether the failure happened after the speculative commit, i.e. the
    /// engine had to restore the entity's state.
    pub fn rolled_back(&self) -> bool {
        self.hook_slot().is_some_and(|slot| slot.requires_rollback())
    }
}
