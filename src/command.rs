//! `CommonSave` plugin commands
//!
//! ```text
//! CommonSave load     # apply shared switches/variables to the game
//! CommonSave save     # store tracked switches/variables
//! CommonSave exists   # query whether shared data exists
//! CommonSave remove   # delete shared data
//! ```

use crate::consts::PLUGIN_COMMAND;
use crate::persistence::ShareManager;
use crate::state::StateStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Load,
    Save,
    Exists,
    Remove,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Load => "load",
            Command::Save => "save",
            Command::Exists => "exists",
            Command::Remove => "remove",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "load" => Some(Command::Load),
            "save" => Some(Command::Save),
            "exists" => Some(Command::Exists),
            "remove" => Some(Command::Remove),
            _ => None,
        }
    }

    /// Parse a plugin command line split into name and arguments.
    /// Other plugins' commands and unknown sub-commands give `None`.
    pub fn parse(command: &str, args: &[&str]) -> Option<Self> {
        if command != PLUGIN_COMMAND {
            return None;
        }
        args.first().and_then(|sub| Self::from_str(sub))
    }

    /// Run against `manager`. `exists` only reports; it changes nothing.
    pub fn execute<S: StateStore + ?Sized>(
        self,
        manager: &ShareManager,
        state: &mut S,
    ) -> CommandOutcome {
        match self {
            Command::Load => CommandOutcome::Loaded(manager.load(state)),
            Command::Save => CommandOutcome::Saved(
                manager
                    .save(&*state)
                    .inspect_err(|e| log::error!("CommonSave save failed: {}", e))
                    .is_ok(),
            ),
            Command::Exists => CommandOutcome::Exists(manager.exists()),
            Command::Remove => CommandOutcome::Removed(
                manager
                    .remove()
                    .inspect_err(|e| log::error!("CommonSave remove failed: {}", e))
                    .is_ok(),
            ),
        }
    }
}

/// What a dispatched command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// `true` when shared data was found and applied
    Loaded(bool),
    /// `false` when the write failed (already logged)
    Saved(bool),
    Exists(bool),
    /// `false` when the delete failed (already logged)
    Removed(bool),
}

/// Handle one line from the host's plugin command channel
pub fn dispatch<S: StateStore + ?Sized>(
    manager: &ShareManager,
    command: &str,
    args: &[&str],
    state: &mut S,
) -> Option<CommandOutcome> {
    let parsed = Command::parse(command, args);
    if parsed.is_none() && command == PLUGIN_COMMAND {
        log::debug!("Ignoring unknown CommonSave command {:?}", args);
    }
    parsed.map(|cmd| cmd.execute(manager, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{KeyValueBackend, MemoryStore};
    use crate::settings::ShareSettings;
    use crate::state::GameState;

    fn manager() -> ShareManager {
        let settings = ShareSettings {
            target_flags: vec![1],
            target_counters: vec![],
            auto_sync: false,
        };
        ShareManager::with_backend(settings, KeyValueBackend::new(MemoryStore::new()))
    }

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("CommonSave", &["load"]), Some(Command::Load));
        assert_eq!(Command::parse("CommonSave", &["remove", "extra"]), Some(Command::Remove));
        assert_eq!(Command::parse("CommonSave", &["LOAD"]), None);
        assert_eq!(Command::parse("CommonSave", &[]), None);
        assert_eq!(Command::parse("OtherPlugin", &["save"]), None);
    }

    #[test]
    fn test_as_str_matches_parse() {
        for cmd in [Command::Load, Command::Save, Command::Exists, Command::Remove] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
    }

    #[test]
    fn test_dispatch_flow() {
        let manager = manager();
        let mut state = GameState::new();
        state.set_flag(1, true);

        assert_eq!(
            dispatch(&manager, "CommonSave", &["exists"], &mut state),
            Some(CommandOutcome::Exists(false))
        );
        assert_eq!(
            dispatch(&manager, "CommonSave", &["save"], &mut state),
            Some(CommandOutcome::Saved(true))
        );

        state.set_flag(1, false);
        assert_eq!(
            dispatch(&manager, "CommonSave", &["load"], &mut state),
            Some(CommandOutcome::Loaded(true))
        );
        assert!(state.flag(1));

        assert_eq!(
            dispatch(&manager, "CommonSave", &["remove"], &mut state),
            Some(CommandOutcome::Removed(true))
        );
        assert!(!manager.exists());
    }

    #[test]
    fn test_exists_has_no_side_effects() {
        let manager = manager();
        let mut state = GameState::new();
        state.set_flag(1, true);
        dispatch(&manager, "CommonSave", &["exists"], &mut state);
        assert!(!manager.exists());
        assert!(state.flag(1));
    }

    #[test]
    fn test_dispatch_ignores_unknown() {
        let manager = manager();
        let mut state = GameState::new();
        assert_eq!(dispatch(&manager, "CommonSave", &["reset"], &mut state), None);
        assert_eq!(dispatch(&manager, "Other", &["save"], &mut state), None);
        assert!(!manager.exists());
    }
}
