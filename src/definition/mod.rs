//! Serializable, hook-free description of a state machine.
//!
//! A `MachineDefinition` captures states, the initial state and every
//! event's rules, so machine layouts can live in configuration files.
//! Hooks are code and are not part of it; they are attached through the
//! builder after loading.

use crate::builder::DefinitionError;
use crate::engine::StateMachine;
use serde::{Deserialize, Serialize};

/// One rule of an event: the target and the states it applies from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub to: String,
    pub from: Vec<String>,
}

/// An event and its rules, in resolution order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventSpec {
    pub name: String,
    #[serde(default)]
    pub transitions: Vec<RuleSpec>,
}

/// Declarative layout of a state machine.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Context, Statable, TrackedState};
/// use waypoint::definition::MachineDefinition;
/// use waypoint::StateMachine;
///
/// let definition = MachineDefinition::from_json(r#"{
///     "initial": "draft",
///     "states": ["draft", "checkout", "paid"],
///     "events": [
///         { "name": "checkout", "transitions": [{ "to": "checkout", "from": ["draft"] }] },
///         { "name": "pay", "transitions": [{ "to": "paid", "from": ["checkout"] }] }
///     ]
/// }"#).unwrap();
///
/// let machine: StateMachine<TrackedState> = StateMachine::from_definition(&definition);
/// assert!(machine.validate().is_success());
///
/// let mut order = TrackedState::new();
/// machine.trigger(&Context::background(), "checkout", &mut order).unwrap();
/// assert_eq!(order.state(), Some("checkout"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<String>,
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub events: Vec<EventSpec>,
}

impl MachineDefinition {
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        serde_json::from_str(json).map_err(|e| DefinitionError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, DefinitionError> {
        serde_json::to_string_pretty(self).map_err(|e| DefinitionError::Serialize(e.to_string()))
    }
}

impl<T> StateMachine<T> {
    /// Build a machine from a definition. The result has no hooks.
    ///
    /// States listed under `states` are declared in order; the initial state
    /// is declared even when it is not listed. Rule states are not declared
    /// implicitly, so [`validate`](Self::validate) reports them if missing.
    pub fn from_definition(definition: &MachineDefinition) -> Self {
        let mut machine = Self::new();
        if let Some(initial) = &definition.initial {
            machine.initial(initial);
        }
        for state in &definition.states {
            machine.state(state);
        }
        for event in &definition.events {
            machine.event(&event.name);
            for rule in &event.transitions {
                machine
                    .event(&event.name)
                    .to(&rule.to)
                    .from(rule.from.iter().cloned());
            }
        }
        machine
    }

    /// Export the hook-free layout of this machine.
    pub fn definition(&self) -> MachineDefinition {
        MachineDefinition {
            initial: self.initial_state().map(str::to_string),
            states: self.states().map(|state| state.name().to_string()).collect(),
            events: self
                .events()
                .map(|event| EventSpec {
                    name: event.name().to_string(),
                    transitions: event
                        .rules()
                        .iter()
                        .map(|rule| RuleSpec {
                            to: rule.target().to_string(),
                            from: rule.sources().to_vec(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Context, Statable, TrackedState};

    const ORDER_JSON: &str = r#"{
        "initial": "draft",
        "states": ["draft", "checkout", "paid", "processed", "cancelled", "paid_cancelled"],
        "events": [
            { "name": "checkout", "transitions": [{ "to": "checkout", "from": ["draft"] }] },
            { "name": "cancel", "transitions": [
                { "to": "cancelled", "from": ["draft", "checkout"] },
                { "to": "paid_cancelled", "from": ["paid", "processed"] }
            ] }
        ]
    }"#;

    #[test]
    fn definition_loads_from_json() {
        let definition = MachineDefinition::from_json(ORDER_JSON).unwrap();

        assert_eq!(definition.initial.as_deref(), Some("draft"));
        assert_eq!(definition.states.len(), 6);
        assert_eq!(definition.events[1].transitions.len(), 2);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let result = MachineDefinition::from_json("{ \"states\": 3 }");
        assert!(matches!(result, Err(DefinitionError::Parse(_))));
    }

    #[test]
    fn machine_from_definition_dispatches_rules() {
        let definition = MachineDefinition::from_json(ORDER_JSON).unwrap();
        let machine: StateMachine<TrackedState> = StateMachine::from_definition(&definition);
        let ctx = Context::background();

        let mut unpaid = TrackedState::new();
        machine.trigger(&ctx, "cancel", &mut unpaid).unwrap();
        assert_eq!(unpaid.state(), Some("cancelled"));

        let mut paid = TrackedState::starting_at("paid");
        machine.trigger(&ctx, "cancel", &mut paid).unwrap();
        assert_eq!(paid.state(), Some("paid_cancelled"));
    }

    #[test]
    fn exported_definition_matches_builder_calls() {
        let mut machine: StateMachine<TrackedState> = StateMachine::new();
        machine.initial("draft");
        machine.state("checkout");
        machine
            .event("checkout")
            .to("checkout")
            .from(["draft"])
            .before(|_ctx, _order| Ok(()));

        let definition = machine.definition();
        assert_eq!(
            definition,
            MachineDefinition {
                initial: Some("draft".to_string()),
                states: vec!["draft".to_string(), "checkout".to_string()],
                events: vec![EventSpec {
                    name: "checkout".to_string(),
                    transitions: vec![RuleSpec {
                        to: "checkout".to_string(),
                        from: vec!["draft".to_string()],
                    }],
                }],
            }
        );
    }

    #[test]
    fn definition_survives_export_and_reload() {
        let definition = MachineDefinition::from_json(ORDER_JSON).unwrap();
        let machine: StateMachine<TrackedState> = StateMachine::from_definition(&definition);

        let reloaded = MachineDefinition::from_json(&machine.definition().to_json().unwrap()).unwrap();
        assert_eq!(reloaded, definition);
    }

    #[test]
    fn undeclared_rule_states_fail_validation() {
        let definition = MachineDefinition {
            initial: Some("draft".to_string()),
            states: Vec::new(),
            events: vec![EventSpec {
                name: "checkout".to_string(),
                transitions: vec![RuleSpec {
                    to: "checkout".to_string(),
                    from: vec!["draft".to_string()],
                }],
            }],
        };
        let machine: StateMachine<TrackedState> = StateMachine::from_definition(&definition);

        let errors = machine.validated().unwrap_err();
        assert_eq!(
            errors,
            vec![DefinitionError::UndeclaredState {
                event: "checkout".to_string(),
                state: "checkout".to_string(),
            }]
        );
    }
}
