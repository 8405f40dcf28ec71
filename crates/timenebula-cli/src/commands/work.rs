use std::cell::RefCell;

use clap::Subcommand;
use timenebula_core::error::Result;
use timenebula_core::session::{EngineState, SessionEngine, Transition};
use timenebula_core::{ClockPoller, Config, CoreError, Database, Event, SystemClock};
use tracing::warn;

const ENGINE_KEY: &str = "session_engine";

type Engine<'a> = SessionEngine<&'a Database, SystemClock>;

#[derive(Subcommand)]
pub enum WorkAction {
    /// Start a work session
    Start,
    /// Stop the current work session
    Stop,
    /// Print current engine state as JSON
    Status,
    /// Check whether an hour is due, then print state
    Tick,
    /// Claim one elapsed hour and tag it
    Settle {
        /// What the hour was spent on
        tag: String,
        /// Accept a tag outside the configured choices
        #[arg(long)]
        any_tag: bool,
    },
    /// Enter settlement without waiting for the hour
    ForceSettle,
    /// Credit assets directly, bypassing the ledger
    AddAssets {
        amount: u64,
    },
    /// Poll the clock in the foreground until Ctrl-C
    Watch,
}

fn load_state(db: &Database) -> Result<Option<EngineState>> {
    let Some(json) = db.kv_get(ENGINE_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str::<EngineState>(&json) {
        Ok(state) => Ok(Some(state)),
        Err(e) => {
            warn!(error = %e, "discarding unreadable engine state");
            Ok(None)
        }
    }
}

fn load_engine<'a>(db: &'a Database, config: &Config) -> Result<Engine<'a>> {
    let engine = match load_state(db)? {
        Some(state) => SessionEngine::restore(state, config.engine, db, SystemClock)?,
        None => SessionEngine::new(config.engine, db, SystemClock)?,
    };
    Ok(engine)
}

fn save_engine(db: &Database, engine: &Engine<'_>) -> Result<()> {
    let json = serde_json::to_string(engine.state())?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

fn print_event(event: &Event) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

/// Print what a transition did. A no-op prints the current state instead.
fn report(transition: Transition, engine: &Engine<'_>) -> Result<()> {
    if let Some(e) = &transition.ledger_error {
        eprintln!("warning: ledger write failed, continuing in memory: {e}");
    }
    match transition.event {
        Some(event) => print_event(&event),
        None => {
            eprintln!("nothing to do in state {:?}", engine.status());
            print_event(&engine.snapshot())
        }
    }
}

fn check_tag(config: &Config, tag: &str, any_tag: bool) -> Result<()> {
    if any_tag || config.tags.contains(tag) {
        return Ok(());
    }
    Err(CoreError::Custom(format!(
        "unknown tag '{tag}' (choices: {}; pass --any-tag to use it anyway)",
        config.tags.choices.join(", ")
    )))
}

fn watch<'a>(db: &'a Database, config: &Config, engine: &mut Engine<'a>) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    print_event(&engine.snapshot())?;
    let last_saved = RefCell::new(engine.state().clone());

    runtime.block_on(async {
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        };

        ClockPoller::from_settings(&config.poller)
            .run_synced(
                engine,
                shutdown,
                |engine| {
                    // Pick up start, stop and settle done by other invocations.
                    let stored = match load_state(db) {
                        Ok(Some(stored)) if stored != *last_saved.borrow() => stored,
                        Ok(_) => return,
                        Err(e) => {
                            warn!(error = %e, "failed to read saved engine state");
                            return;
                        }
                    };
                    match SessionEngine::restore(stored.clone(), config.engine, db, SystemClock) {
                        Ok(restored) => {
                            *engine = restored;
                            *last_saved.borrow_mut() = stored;
                            if let Err(e) = print_event(&engine.snapshot()) {
                                warn!(error = %e, "failed to print event");
                            }
                        }
                        Err(e) => warn!(error = %e, "failed to reload engine state"),
                    }
                },
                |engine, event| {
                    if let Err(e) = print_event(event) {
                        warn!(error = %e, "failed to print event");
                    }
                    match save_engine(db, engine) {
                        Ok(()) => *last_saved.borrow_mut() = engine.state().clone(),
                        Err(e) => warn!(error = %e, "failed to save engine state"),
                    }
                },
            )
            .await;
    });

    Ok(())
}

pub fn run(action: WorkAction) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open()?;
    execute(action, &db, &config)
}

fn execute(action: WorkAction, db: &Database, config: &Config) -> Result<()> {
    let mut engine = load_engine(db, config)?;

    match action {
        WorkAction::Start => {
            let transition = engine.start_work();
            report(transition, &engine)?;
        }
        WorkAction::Stop => {
            let transition = engine.stop_work();
            report(transition, &engine)?;
        }
        WorkAction::Status => {
            // Read-only.
            return print_event(&engine.snapshot());
        }
        WorkAction::Tick => {
            if let Some(event) = engine.check_time() {
                print_event(&event)?;
            }
            print_event(&engine.snapshot())?;
        }
        WorkAction::Settle { tag, any_tag } => {
            check_tag(config, &tag, any_tag)?;
            let transition = engine.complete_settlement(&tag);
            report(transition, &engine)?;
        }
        WorkAction::ForceSettle => {
            let transition = Transition {
                event: engine.trigger_settlement(),
                ledger_error: None,
            };
            report(transition, &engine)?;
        }
        WorkAction::AddAssets { amount } => {
            print_event(&engine.add_assets(amount))?;
        }
        WorkAction::Watch => {
            // Saves on its own, only after events.
            return watch(db, config, &mut engine);
        }
    }

    save_engine(db, &engine)?;
    Ok(())
}
