//! Property-based tests for transition resolution and rollback.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated machines, states and hook outcomes.

use proptest::prelude::*;
use waypoint::core::{Context, HookSlot, Statable, TrackedState};
use waypoint::StateMachine;

const STATES: [&str; 5] = ["draft", "checkout", "paid", "processed", "cancelled"];

prop_compose! {
    fn arbitrary_state()(index in 0..STATES.len()) -> &'static str {
        STATES[index]
    }
}

prop_compose! {
    fn arbitrary_rule()(
        target in arbitrary_state(),
        sources in prop::collection::vec(arbitrary_state(), 1..4)
    ) -> (&'static str, Vec<&'static str>) {
        (target, sources)
    }
}

fn machine_with_rules(rules: &[(&'static str, Vec<&'static str>)]) -> StateMachine<TrackedState> {
    let mut machine = StateMachine::new();
    machine.initial("draft");
    for state in STATES {
        machine.state(state);
    }
    for (target, sources) in rules {
        machine.event("go").to(target).from(sources.iter().copied());
    }
    machine
}

fn failing_at(
    machine: &mut StateMachine<TrackedState>,
    slot: HookSlot,
    from: &str,
    to: &str,
) {
    let fail = |_ctx: &Context, _entity: &mut TrackedState| -> anyhow::Result<()> {
        anyhow::bail!("intentional error")
    };
    match slot {
        HookSlot::Before => {
            machine.event("go").to(to).from([from]).before(fail);
        }
        HookSlot::Exit => {
            machine.state(from).exit(fail);
        }
        HookSlot::Enter => {
            machine.state(to).enter(fail);
        }
        HookSlot::After => {
            machine.event("go").to(to).from([from]).after(fail);
        }
    }
}

fn arbitrary_slot() -> impl Strategy<Value = HookSlot> {
    prop_oneof![
        Just(HookSlot::Before),
        Just(HookSlot::Exit),
        Just(HookSlot::Enter),
        Just(HookSlot::After),
    ]
}

proptest! {
    #[test]
    fn resolution_picks_first_declared_match(
        rules in prop::collection::vec(arbitrary_rule(), 1..6),
        state in arbitrary_state()
    ) {
        let machine = machine_with_rules(&rules);
        let entity = TrackedState::starting_at(state);

        let expected = rules
            .iter()
            .find(|(_, sources)| sources.contains(&state))
            .map(|(target, _)| *target);
        let resolved = machine.resolve("go", &entity).ok().map(|rule| rule.target());

        prop_assert_eq!(resolved, expected);
    }

    #[test]
    fn success_lands_on_resolved_target(
        rules in prop::collection::vec(arbitrary_rule(), 1..6),
        state in arbitrary_state()
    ) {
        let machine = machine_with_rules(&rules);
        let mut entity = TrackedState::starting_at(state);
        let expected = machine
            .resolve("go", &entity)
            .ok()
            .map(|rule| rule.target().to_string());

        let result = machine.trigger(&Context::background(), "go", &mut entity);

        match expected {
            Some(target) => {
                let change = result.unwrap();
                prop_assert_eq!(&change.to, &target);
                prop_assert_eq!(entity.state(), Some(target.as_str()));
                prop_assert_eq!(change.from.as_str(), state);
            }
            None => {
                prop_assert!(result.is_err());
                prop_assert_eq!(entity.state(), Some(state));
            }
        }
    }

    #[test]
    fn any_hook_failure_restores_prior_state(
        from in arbitrary_state(),
        to in arbitrary_state(),
        slot in arbitrary_slot(),
        start_unset in any::<bool>()
    ) {
        let mut machine = machine_with_rules(&[(to, vec![from])]);
        failing_at(&mut machine, slot, from, to);

        let mut entity = if start_unset && from == "draft" {
            TrackedState::new()
        } else {
            TrackedState::starting_at(from)
        };

        let err = machine
            .trigger(&Context::background(), "go", &mut entity)
            .unwrap_err();

        // An unset entity settles in the initial state it was resolved from.
        prop_assert_eq!(err.hook_slot(), Some(slot));
        prop_assert_eq!(entity, TrackedState::starting_at(from));
    }
}
