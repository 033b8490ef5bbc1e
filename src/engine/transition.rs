//! State, rule and event definitions owned by a state machine.

use crate::core::Hook;

/// A named state with optional enter/exit hooks.
#[derive(Debug)]
pub struct StateDefinition<T> {
    pub(crate) name: String,
    pub(crate) on_enter: Option<Hook<T>>,
    pub(crate) on_exit: Option<Hook<T>>,
    pub(crate) is_initial: bool,
}

impl<T> StateDefinition<T> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on_enter: None,
            on_exit: None,
            is_initial: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether unset entities start from this state.
    pub fn is_initial(&self) -> bool {
        self.is_initial
    }

    pub fn has_enter_hook(&self) -> bool {
        self.on_enter.is_some()
    }

    pub fn has_exit_hook(&self) -> bool {
        self.on_exit.is_some()
    }
}

/// Maps a set of source states to one target state under a single event.
///
/// Sources keep their declaration order and never contain duplicates.
#[derive(Debug)]
pub struct TransitionRule<T> {
    pub(crate) target: String,
    pub(crate) sources: Vec<String>,
    pub(crate) before: Option<Hook<T>>,
    pub(crate) after: Option<Hook<T>>,
}

impl<T> TransitionRule<T> {
    pub(crate) fn new(target: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            target: target.into(),
            sources,
            before: None,
            after: None,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Check if this rule applies to the given state (pure)
    pub fn applies_to(&self, state: &str) -> bool {
        self.sources.iter().any(|source| source == state)
    }

    /// Whether this rule was declared with exactly `target` and `sources`,
    /// ignoring source order.
    pub(crate) fn matches_declaration(&self, target: &str, sources: &[String]) -> bool {
        self.target == target
            && self.sources.len() == sources.len()
            && sources.iter().all(|source| self.applies_to(source))
    }

    pub fn has_before_hook(&self) -> bool {
        self.before.is_some()
    }

    pub fn has_after_hook(&self) -> bool {
        self.after.is_some()
    }
}

/// A named, ordered collection of transition rules.
#[derive(Debug)]
pub struct EventDefinition<T> {
    pub(crate) name: String,
    pub(crate) rules: Vec<TransitionRule<T>>,
}

impl<T> EventDefinition<T> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[TransitionRule<T>] {
        &self.rules
    }

    /// Select the first rule, in declaration order, whose sources contain
    /// `state`.
    pub fn resolve(&self, state: &str) -> Option<&TransitionRule<T>> {
        self.rules.iter().find(|rule| rule.applies_to(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn cancel_event() -> EventDefinition<()> {
        let mut event = EventDefinition::new("cancel");
        event
            .rules
            .push(TransitionRule::new("cancelled", sources(&["draft", "checkout"])));
        event.rules.push(TransitionRule::new(
            "paid_cancelled",
            sources(&["paid", "processed"]),
        ));
        event
    }

    #[test]
    fn applies_to_matches_source_states() {
        let rule: TransitionRule<()> = TransitionRule::new("paid", sources(&["checkout"]));

        assert!(rule.applies_to("checkout"));
        assert!(!rule.applies_to("draft"));
    }

    #[test]
    fn resolve_dispatches_by_source() {
        let event = cancel_event();

        assert_eq!(event.resolve("draft").unwrap().target(), "cancelled");
        assert_eq!(event.resolve("checkout").unwrap().target(), "cancelled");
        assert_eq!(event.resolve("paid").unwrap().target(), "paid_cancelled");
        assert!(event.resolve("delivered").is_none());
    }

    #[test]
    fn resolve_prefers_first_declared_rule() {
        let mut event: EventDefinition<()> = EventDefinition::new("archive");
        event
            .rules
            .push(TransitionRule::new("archived", sources(&["draft", "paid"])));
        event
            .rules
            .push(TransitionRule::new("purged", sources(&["paid"])));

        assert_eq!(event.resolve("paid").unwrap().target(), "archived");
    }

    #[test]
    fn declaration_match_ignores_source_order() {
        let rule: TransitionRule<()> =
            TransitionRule::new("cancelled", sources(&["draft", "checkout"]));

        assert!(rule.matches_declaration("cancelled", &sources(&["checkout", "draft"])));
        assert!(!rule.matches_declaration("cancelled", &sources(&["draft"])));
        assert!(!rule.matches_declaration("paid", &sources(&["draft", "checkout"])));
    }

    #[test]
    fn empty_rule_never_applies() {
        let rule: TransitionRule<()> = TransitionRule::new("anywhere", Vec::new());
        assert!(!rule.applies_to("draft"));
        assert!(!rule.applies_to(""));
    }
}
