//! State machine that resolves events and runs the hook pipeline.

use crate::core::{Context, Hook, HookSlot, Statable, StateChange};
use crate::engine::error::TriggerError;
use crate::engine::transition::{EventDefinition, StateDefinition, TransitionRule};
use tracing::{debug, info, instrument, warn};

/// Owns the state and event definitions and drives entities through them.
///
/// The machine is generic over the entity type so hooks receive `&mut T`
/// directly. Definitions are built through [`initial`](Self::initial),
/// [`state`](Self::state) and [`event`](Self::event), and may be augmented
/// between triggers.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Context, Statable, TrackedState};
/// use waypoint::StateMachine;
///
/// let mut machine: StateMachine<TrackedState> = StateMachine::new();
/// machine.initial("draft");
/// machine.state("checkout");
/// machine.event("checkout").to("checkout").from(["draft"]);
///
/// let mut order = TrackedState::new();
/// machine.trigger(&Context::background(), "checkout", &mut order).unwrap();
/// assert_eq!(order.state(), Some("checkout"));
/// ```
#[derive(Debug)]
pub struct StateMachine<T> {
    pub(crate) states: Vec<StateDefinition<T>>,
    pub(crate) events: Vec<EventDefinition<T>>,
    pub(crate) initial: Option<String>,
}

impl<T> Default for StateMachine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StateMachine<T> {
    /// Create an empty state machine
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            events: Vec::new(),
            initial: None,
        }
    }

    pub fn initial_state(&self) -> Option<&str> {
        self.initial.as_deref()
    }

    /// Declared states, in declaration order
    pub fn states(&self) -> impl Iterator<Item = &StateDefinition<T>> {
        self.states.iter()
    }

    /// Declared events, in declaration order
    pub fn events(&self) -> impl Iterator<Item = &EventDefinition<T>> {
        self.events.iter()
    }

    pub fn get_state(&self, name: &str) -> Option<&StateDefinition<T>> {
        self.states.iter().find(|state| state.name == name)
    }

    pub fn get_event(&self, name: &str) -> Option<&EventDefinition<T>> {
        self.events.iter().find(|event| event.name == name)
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.get_state(name).is_some()
    }

    pub(crate) fn state_mut(&mut self, name: &str) -> &mut StateDefinition<T> {
        let index = match self.states.iter().position(|state| state.name == name) {
            Some(index) => index,
            None => {
                debug!(state = name, "registering state");
                self.states.push(StateDefinition::new(name));
                self.states.len() - 1
            }
        };
        &mut self.states[index]
    }

    pub(crate) fn event_mut(&mut self, name: &str) -> &mut EventDefinition<T> {
        let index = match self.events.iter().position(|event| event.name == name) {
            Some(index) => index,
            None => {
                debug!(event = name, "registering event");
                self.events.push(EventDefinition::new(name));
                self.events.len() - 1
            }
        };
        &mut self.events[index]
    }
}

impl<T: Statable> StateMachine<T> {
    /// The state resolution starts from: the entity's own state, or the
    /// machine's initial state when the entity is unset (pure).
    pub fn effective_state<'a>(&'a self, entity: &'a T) -> Option<&'a str> {
        entity.state().or(self.initial.as_deref())
    }

    /// Resolve `event` for `entity` without running any hooks (pure).
    pub fn resolve(&self, event: &str, entity: &T) -> Result<&TransitionRule<T>, TriggerError> {
        self.resolve_from(event, entity).map(|(rule, _)| rule)
    }

    /// Resolve `event` and return the matching rule together with the
    /// effective state it was resolved from.
    fn resolve_from(
        &self,
        event: &str,
        entity: &T,
    ) -> Result<(&TransitionRule<T>, String), TriggerError> {
        let definition = self
            .get_event(event)
            .ok_or_else(|| TriggerError::UnknownEvent {
                event: event.to_string(),
            })?;

        let state = self
            .effective_state(entity)
            .ok_or_else(|| TriggerError::NoInitialState {
                event: event.to_string(),
            })?;

        let rule = definition
            .resolve(state)
            .ok_or_else(|| TriggerError::NoMatchingTransition {
                event: event.to_string(),
                state: state.to_string(),
            })?;
        Ok((rule, state.to_string()))
    }

    /// Check whether `event` would resolve to a rule for `entity` (pure).
    pub fn can_trigger(&self, event: &str, entity: &T) -> bool {
        self.resolve(event, entity).is_ok()
    }

    /// Names of every event that resolves for `entity`, in declaration order.
    pub fn permitted_events(&self, entity: &T) -> Vec<&str> {
        let Some(state) = self.effective_state(entity) else {
            return Vec::new();
        };
        self.events
            .iter()
            .filter(|event| event.resolve(state).is_some())
            .map(|event| event.name())
            .collect()
    }

    /// Fire `event` against `entity`.
    ///
    /// Runs the Before, Exit, Enter and After hooks in that order, committing
    /// the target state between Exit and Enter. An unset entity is first
    /// placed in the initial state, so every hook sees a concrete state and
    /// a failed trigger leaves it there. A failure in Before or Exit leaves
    /// the entity in its starting state; a failure in Enter or After restores
    /// it. Side effects hooks performed themselves are not undone.
    ///
    /// On success the recorded [`StateChange`] is stored on the entity and
    /// returned.
    #[instrument(level = "debug", skip_all, fields(event = %event))]
    pub fn trigger(
        &self,
        ctx: &Context,
        event: &str,
        entity: &mut T,
    ) -> Result<StateChange, TriggerError> {
        let (rule, from) = self.resolve_from(event, entity)?;
        let to = rule.target.clone();
        debug!(from = %from, to = %to, "resolved transition");

        // An unset entity is placed in the initial state before any hook runs.
        if entity.state().is_none() {
            entity.set_state(Some(from.clone()));
        }

        let hook_error = |slot: HookSlot, source: anyhow::Error| TriggerError::Hook {
            slot,
            event: event.to_string(),
            from: from.clone(),
            to: to.clone(),
            source,
        };

        let exit = self.get_state(&from).and_then(|state| state.on_exit.as_ref());
        for (slot, hook) in [(HookSlot::Before, rule.before.as_ref()), (HookSlot::Exit, exit)] {
            if let Err(source) = run_hook(slot, hook, ctx, entity) {
                debug!(slot = %slot, error = %source, "transition vetoed");
                return Err(hook_error(slot, source));
            }
        }

        entity.set_state(Some(to.clone()));

        let enter = self.get_state(&to).and_then(|state| state.on_enter.as_ref());
        for (slot, hook) in [(HookSlot::Enter, enter), (HookSlot::After, rule.after.as_ref())] {
            if let Err(source) = run_hook(slot, hook, ctx, entity) {
                entity.set_state(Some(from.clone()));
                warn!(slot = %slot, error = %source, "transition rolled back");
                return Err(hook_error(slot, source));
            }
        }

        let change = StateChange::now(event, from, to);
        entity.record_state_change(change.clone());
        info!(from = %change.from, to = %change.to, "transition committed");
        Ok(change)
    }
}

fn run_hook<T>(
    slot: HookSlot,
    hook: Option<&Hook<T>>,
    ctx: &Context,
    entity: &mut T,
) -> anyhow::Result<()> {
    match hook {
        Some(hook) => {
            debug!(slot = %slot, "running hook");
            hook.call(ctx, entity)
        }
        None => Ok(()),
    }
}
