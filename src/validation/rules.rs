//! Definition checks for a state machine using Validation.

use crate::builder::DefinitionError;
use crate::engine::{EventDefinition, StateMachine};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of a single definition check.
pub type DefinitionCheck = Validation<(), NonEmptyVec<DefinitionError>>;

fn check(violation: Option<DefinitionError>) -> DefinitionCheck {
    match violation {
        Some(error) => Validation::fail(error),
        None => Validation::success(()),
    }
}

fn check_initial<T>(machine: &StateMachine<T>) -> DefinitionCheck {
    check(
        machine
            .initial_state()
            .is_none()
            .then_some(DefinitionError::MissingInitialState),
    )
}

fn check_event<T>(machine: &StateMachine<T>, event: &EventDefinition<T>) -> Vec<DefinitionCheck> {
    let mut checks = Vec::new();
    let mut covered: Vec<&str> = Vec::new();

    for rule in event.rules() {
        let undeclared = std::iter::once(rule.target())
            .chain(rule.sources().iter().map(String::as_str))
            .filter(|state| !machine.has_state(state));
        for state in undeclared {
            checks.push(check(Some(DefinitionError::UndeclaredState {
                event: event.name().to_string(),
                state: state.to_string(),
            })));
        }

        if rule.sources().is_empty() {
            checks.push(check(Some(DefinitionError::EmptySources {
                event: event.name().to_string(),
                target: rule.target().to_string(),
            })));
        }

        for source in rule.sources() {
            if covered.contains(&source.as_str()) {
                checks.push(check(Some(DefinitionError::OverlappingSources {
                    event: event.name().to_string(),
                    state: source.clone(),
                })));
            } else {
                covered.push(source);
            }
        }
    }

    checks
}

impl<T> StateMachine<T> {
    /// Check every definition invariant, accumulating ALL violations.
    ///
    /// Reports a missing initial state, rules referencing undeclared
    /// states, rules without sources, and states covered by more than one
    /// rule of the same event. Triggering does not require a valid machine;
    /// overlapping rules still resolve to the first declared one.
    pub fn validate(&self) -> DefinitionCheck {
        let mut checks = vec![check_initial(self)];
        for event in self.events() {
            checks.extend(check_event(self, event));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// [`validate`](Self::validate) as a plain `Result`.
    pub fn validated(&self) -> Result<(), Vec<DefinitionError>> {
        match self.validate() {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
        }
    }
}
