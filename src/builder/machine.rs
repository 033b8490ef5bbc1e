//! Registration of states on a state machine.

use crate::builder::transition::EventBuilder;
use crate::core::{Context, Hook};
use crate::engine::{StateDefinition, StateMachine};
use tracing::debug;

impl<T> StateMachine<T> {
    /// Register `name` (if absent) and make it the initial state.
    ///
    /// Only one state is initial at a time; calling this again with another
    /// name moves the flag.
    pub fn initial(&mut self, name: &str) -> StateBuilder<'_, T> {
        if let Some(previous) = self.initial.as_deref().filter(|previous| *previous != name) {
            debug!(previous, initial = name, "reassigning initial state");
        }
        self.state_mut(name);
        for state in &mut self.states {
            state.is_initial = state.name == name;
        }
        self.initial = Some(name.to_string());
        self.state(name)
    }

    /// Register `name` if absent and return its builder.
    pub fn state(&mut self, name: &str) -> StateBuilder<'_, T> {
        StateBuilder {
            definition: self.state_mut(name),
        }
    }

    /// Register the event `name` if absent and return its builder.
    pub fn event(&mut self, name: &str) -> EventBuilder<'_, T> {
        EventBuilder::new(self.event_mut(name))
    }
}

/// Builder for attaching enter/exit hooks to a state.
///
/// Setting a hook twice replaces the earlier one.
pub struct StateBuilder<'a, T> {
    definition: &'a mut StateDefinition<T>,
}

impl<'a, T> StateBuilder<'a, T> {
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn is_initial(&self) -> bool {
        self.definition.is_initial
    }

    /// Set the hook run after an entity moves into this state.
    pub fn enter<F>(self, hook: F) -> Self
    where
        F: Fn(&Context, &mut T) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        if self.definition.on_enter.replace(Hook::new(hook)).is_some() {
            debug!(state = %self.definition.name, "replacing enter hook");
        }
        self
    }

    /// Set the hook run before an entity leaves this state.
    pub fn exit<F>(self, hook: F) -> Self
    where
        F: Fn(&Context, &mut T) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        if self.definition.on_exit.replace(Hook::new(hook)).is_some() {
            debug!(state = %self.definition.name, "replacing exit hook");
        }
        self
    }
}
