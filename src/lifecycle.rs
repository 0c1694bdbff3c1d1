//! Host lifecycle hooks
//!
//! The host runs its slot save, slot load and new game operations through
//! [`Lifecycle::run`]; registered hooks fire synchronously after the
//! operation and before its result is handed back.

use crate::state::StateStore;

/// Host operations that accept post-hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A save slot was written
    SaveSlot,
    /// A save slot was loaded
    LoadSlot,
    /// A new game was set up
    NewGame,
}

/// Post-hook run after a host lifecycle operation
pub trait LifecycleHook {
    fn after(&self, event: LifecycleEvent, state: &mut dyn StateStore);
}

/// Registered post-hooks, run in registration order
#[derive(Default)]
pub struct Lifecycle<'a> {
    hooks: Vec<&'a dyn LifecycleHook>,
}

impl<'a> Lifecycle<'a> {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    pub fn register(&mut self, hook: &'a dyn LifecycleHook) {
        self.hooks.push(hook);
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run `operation`, then every hook for `event`; returns the
    /// operation's own result unchanged
    pub fn run<S, T>(
        &self,
        event: LifecycleEvent,
        state: &mut S,
        operation: impl FnOnce(&mut S) -> T,
    ) -> T
    where
        S: StateStore,
    {
        let result = operation(state);
        for hook in &self.hooks {
            hook.after(event, state);
        }
        result
    }
}
