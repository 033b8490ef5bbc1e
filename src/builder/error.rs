//! Definition errors reported when checking or loading a state machine.

use thiserror::Error;

/// Problems with a machine's definitions.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DefinitionError {
    #[error("Initial state not specified. Call .initial(name) before triggering")]
    MissingInitialState,

    #[error("Event '{event}' references undeclared state '{state}'")]
    UndeclaredState { event: String, state: String },

    #[error("Event '{event}' has a transition to '{target}' with no source states")]
    EmptySources { event: String, target: String },

    #[error("Event '{event}' has more than one transition from state '{state}'")]
    OverlappingSources { event: String, state: String },

    #[error("Definition could not be parsed: {0}")]
    Parse(String),

    #[error("Definition could not be serialized: {0}")]
    Serialize(String),
}
