//! Core types shared by the definition model and the engine.
//!
//! - The `Statable` capability entities implement to be driven
//! - `StateChange` bookkeeping for the last committed transition
//! - `Hook` callbacks and the `HookSlot` they run in
//! - The cancellation `Context` passed to every hook

mod change;
mod context;
mod hook;
mod state;

pub use change::StateChange;
pub use context::{Context, ContextError};
pub use hook::{Hook, HookSlot};
pub use state::{Statable, TrackedState};
