//! Macros for wiring entities into the `Statable` capability.

/// Implement [`Statable`](crate::core::Statable) for a type by forwarding
/// to one of its fields.
///
/// The field is usually a [`TrackedState`](crate::core::TrackedState), but
/// any `Statable` field works.
///
/// # Example
///
/// ```
/// use waypoint::core::{Statable, TrackedState};
/// use waypoint::statable;
///
/// struct Order {
///     id: u64,
///     tracking: TrackedState,
/// }
///
/// statable!(Order => tracking);
///
/// let mut order = Order { id: 7, tracking: TrackedState::new() };
/// order.set_state(Some("checkout".to_string()));
/// assert_eq!(order.state(), Some("checkout"));
/// assert_eq!(order.tracking.state(), Some("checkout"));
/// ```
#[macro_export]
macro_rules! statable {
    ($($ty:ty => $field:ident),+ $(,)?) => {
        $(
            impl $crate::core::Statable for $ty {
                fn state(&self) -> ::std::option::Option<&str> {
                    $crate::core::Statable::state(&self.$field)
                }

                fn set_state(&mut self, state: ::std::option::Option<::std::string::String>) {
                    $crate::core::Statable::set_state(&mut self.$field, state)
                }

                fn last_state_change(&self) -> ::std::option::Option<&$crate::core::StateChange> {
                    $crate::core::Statable::last_state_change(&self.$field)
                }

                fn record_state_change(&mut self, change: $crate::core::StateChange) {
                    $crate::core::Statable::record_state_change(&mut self.$field, change)
                }
            }
        )+
    };
}
