//! Builders for events and their transition rules.

use crate::core::{Context, Hook};
use crate::engine::{EventDefinition, TransitionRule};
use tracing::{debug, warn};

/// Builder for an event's transition rules.
pub struct EventBuilder<'a, T> {
    definition: &'a mut EventDefinition<T>,
}

impl<'a, T> EventBuilder<'a, T> {
    pub(crate) fn new(definition: &'a mut EventDefinition<T>) -> Self {
        Self { definition }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Begin a rule moving entities into `target`.
    pub fn to(self, target: &str) -> TransitionBuilder<'a, T> {
        TransitionBuilder {
            definition: self.definition,
            target: target.to_string(),
        }
    }
}

/// A rule that knows its target and is waiting for its source states.
#[must_use = "a transition is only registered once `.from(...)` is called"]
pub struct TransitionBuilder<'a, T> {
    definition: &'a mut EventDefinition<T>,
    target: String,
}

impl<'a, T> TransitionBuilder<'a, T> {
    /// Set the states this rule applies from and register it.
    ///
    /// If the event already has a rule with the same target and the same
    /// set of sources, that rule is returned instead of adding a duplicate.
    pub fn from<I, S>(self, sources: I) -> RuleBuilder<'a, T>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut deduped: Vec<String> = Vec::new();
        for source in sources {
            let source = source.into();
            if !deduped.contains(&source) {
                deduped.push(source);
            }
        }

        let definition = self.definition;
        let index = match definition
            .rules
            .iter()
            .position(|rule| rule.matches_declaration(&self.target, &deduped))
        {
            Some(index) => index,
            None => {
                if deduped.is_empty() {
                    warn!(
                        event = %definition.name,
                        to = %self.target,
                        "transition declared without source states"
                    );
                }
                for earlier in &definition.rules {
                    if let Some(shared) = deduped.iter().find(|source| earlier.applies_to(source)) {
                        debug!(
                            event = %definition.name,
                            state = %shared,
                            shadowed_by = %earlier.target,
                            "source state already covered by an earlier rule"
                        );
                    }
                }
                definition
                    .rules
                    .push(TransitionRule::new(self.target, deduped));
                definition.rules.len() - 1
            }
        };

        RuleBuilder {
            event: &definition.name,
            rule: &mut definition.rules[index],
        }
    }
}

/// Builder for hooks scoped to a single transition rule.
///
/// Setting a hook twice replaces the earlier one.
pub struct RuleBuilder<'a, T> {
    event: &'a str,
    rule: &'a mut TransitionRule<T>,
}

impl<'a, T> RuleBuilder<'a, T> {
    pub fn target(&self) -> &str {
        &self.rule.target
    }

    pub fn sources(&self) -> &[String] {
        &self.rule.sources
    }

    /// Set the hook run before anything else; failing it vetoes the
    /// transition.
    pub fn before<F>(self, hook: F) -> Self
    where
        F: Fn(&Context, &mut T) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        if self.rule.before.replace(Hook::new(hook)).is_some() {
            debug!(event = self.event, to = %self.rule.target, "replacing before hook");
        }
        self
    }

    /// Set the hook run last, once the entity is in the target state.
    pub fn after<F>(self, hook: F) -> Self
    where
        F: Fn(&Context, &mut T) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        if self.rule.after.replace(Hook::new(hook)).is_some() {
            debug!(event = self.event, to = %self.rule.target, "replacing after hook");
        }
        self
    }
}
