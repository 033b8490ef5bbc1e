//! Hooks invoked at the four pipeline slots of a transition.
//!
//! A hook is a fallible callback over the concrete entity type. Before and
//! Exit hooks act as guards (they run before any mutation and can veto it);
//! Enter and After hooks act as notifications (they observe the entity in
//! its new state, and a failure rolls the state back).

use super::context::Context;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The pipeline slot a hook is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookSlot {
    /// Rule-scoped, runs first, before any mutation
    Before,
    /// Runs when leaving the source state, before any mutation
    Exit,
    /// Runs when entering the target state, after the speculative commit
    Enter,
    /// Rule-scoped, runs last
    After,
}

impl HookSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::Exit => "exit",
            Self::Enter => "enter",
            Self::After => "after",
        }
    }

    /// Whether a failure in this slot happens after the state was changed.
    pub fn requires_rollback(&self) -> bool {
        matches!(self, Self::Enter | Self::After)
    }
}

impl fmt::Display for HookSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fallible callback run against an entity during a transition.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Context, Hook};
///
/// struct Order {
///     address: String,
/// }
///
/// let require_address = Hook::new(|_ctx: &Context, order: &mut Order| {
///     if order.address.is_empty() {
///         anyhow::bail!("order has no shipping address");
///     }
///     Ok(())
/// });
///
/// let ctx = Context::background();
/// let mut order = Order { address: String::new() };
/// assert!(require_address.call(&ctx, &mut order).is_err());
///
/// order.address = "221B Baker Street".to_string();
/// assert!(require_address.call(&ctx, &mut order).is_ok());
/// ```
pub struct Hook<T> {
    callback: Box<dyn Fn(&Context, &mut T) -> anyhow::Result<()> + Send + Sync>,
}

impl<T> Hook<T> {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Context, &mut T) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Hook {
            callback: Box::new(callback),
        }
    }

    pub fn call(&self, ctx: &Context, entity: &mut T) -> anyhow::Result<()> {
        (self.callback)(ctx, entity)
    }
}

impl<T> fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook")
    }
}
