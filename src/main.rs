//! Common Save entry point
//!
//! Native: command-line front end over a slot file and a save directory.
//! Web: sets up browser logging; the host drives the library directly.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::fs;
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use clap::{Parser, Subcommand};

    use common_save::consts::{PARAM_TARGET_SWITCHES, PARAM_TARGET_VARIABLES};
    use common_save::{
        Command, CommandOutcome, FileBackend, GameState, Lifecycle, LifecycleEvent,
        PluginParameters, ShareManager, ShareSettings, StorageMode,
    };

    #[derive(Parser, Debug)]
    #[command(name = "common-save", version, about = "Share switches and variables across save slots")]
    struct Args {
        /// Directory holding common.rpgsave
        #[arg(long)]
        save_dir: Option<PathBuf>,

        /// Plugin parameters as a JSON object
        #[arg(long)]
        config: Option<PathBuf>,

        /// Tracked switch indices, e.g. "11,12,13" (overrides --config)
        #[arg(long)]
        switches: Option<String>,

        /// Tracked variable indices, e.g. "1,2,3" (overrides --config)
        #[arg(long)]
        variables: Option<String>,

        #[command(subcommand)]
        command: SubCommand,
    }

    #[derive(Subcommand, Debug)]
    enum SubCommand {
        /// Apply shared values to a slot file
        Load {
            #[arg(long)]
            slot: PathBuf,
        },
        /// Store tracked values of a slot file
        Save {
            #[arg(long)]
            slot: PathBuf,
        },
        /// Report whether shared data exists
        Exists,
        /// Delete shared data
        Remove,
        /// Write a fresh slot file, picking up shared values when auto-sync is on
        NewGame {
            #[arg(long)]
            slot: PathBuf,
        },
    }

    fn load_parameters(args: &Args) -> Result<PluginParameters> {
        let mut params = match &args.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                PluginParameters::from_json(&json)
                    .with_context(|| format!("Failed to parse config {}", path.display()))?
            }
            None => PluginParameters::new(),
        };
        if let Some(switches) = &args.switches {
            params.set(PARAM_TARGET_SWITCHES, switches.as_str());
        }
        if let Some(variables) = &args.variables {
            params.set(PARAM_TARGET_VARIABLES, variables.as_str());
        }
        Ok(params)
    }

    fn read_slot(path: &Path) -> Result<GameState> {
        if !path.exists() {
            log::info!("Slot {} not found, starting empty", path.display());
            return Ok(GameState::new());
        }
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read slot {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("Failed to parse slot {}", path.display()))
    }

    fn write_slot(path: &Path, state: &GameState) -> Result<()> {
        let json = serde_json::to_string_pretty(state).context("Failed to serialize slot")?;
        fs::write(path, json).with_context(|| format!("Failed to write slot {}", path.display()))
    }

    fn report(outcome: CommandOutcome) {
        match outcome {
            CommandOutcome::Loaded(true) => println!("loaded"),
            CommandOutcome::Loaded(false) => println!("no common save data"),
            CommandOutcome::Saved(ok) => println!("{}", if ok { "saved" } else { "save failed" }),
            CommandOutcome::Exists(exists) => println!("{}", exists),
            CommandOutcome::Removed(ok) => println!("{}", if ok { "removed" } else { "remove failed" }),
        }
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        let settings = ShareSettings::from_parameters(&load_parameters(&args)?);
        let save_dir = args.save_dir.clone().unwrap_or_else(FileBackend::default_dir);
        let manager = ShareManager::open(settings, StorageMode::LocalFile, &save_dir)?;

        match &args.command {
            SubCommand::Load { slot } => {
                let mut state = read_slot(slot)?;
                let outcome = Command::Load.execute(&manager, &mut state);
                if outcome == CommandOutcome::Loaded(true) {
                    write_slot(slot, &state)?;
                }
                report(outcome);
            }
            SubCommand::Save { slot } => {
                let mut state = read_slot(slot)?;
                report(Command::Save.execute(&manager, &mut state));
            }
            SubCommand::Exists => report(Command::Exists.execute(&manager, &mut GameState::new())),
            SubCommand::Remove => report(Command::Remove.execute(&manager, &mut GameState::new())),
            SubCommand::NewGame { slot } => {
                let mut lifecycle = Lifecycle::new();
                lifecycle.register(&manager);

                let mut state = GameState::new();
                lifecycle.run(LifecycleEvent::NewGame, &mut state, GameState::clear);
                write_slot(slot, &state)?;
                println!("new game written to {}", slot.display());
            }
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
    }
    log::info!("Common Save ready (storage: {:?})", common_save::StorageMode::detect());
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}
