use std::io::{self, BufRead, Write};

use rand::rngs::ThreadRng;

use pitch_signs::catalog::PitchDatabase;
use pitch_signs::commands::Command;
use pitch_signs::config::Config;
use pitch_signs::cue::{BeepCue, FileCue, SignCue, SilentCue};
use pitch_signs::error::AppResult;
use pitch_signs::grid::{GridLocation, GRID_SIZE};
use pitch_signs::state::{AtBatOutcome, SessionState, Sign};

use sysinfo::System;

const LOG_TARGET_STARTUP: &str = "pitch_signs::startup";

/// Initialize tracing with file rotation
///
/// Logs are written to:
/// - macOS: ~/Library/Application Support/PitchSigns/logs/
/// - Windows: %APPDATA%/PitchSigns/logs/
/// - Linux: ~/.config/PitchSigns/logs/
///
/// Log rotation:
/// - Daily rotation (new file each day)
///
/// Log output:
/// - Debug builds: Console + File
/// - Release builds: File only
fn initialize_tracing() {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_dir = dirs::config_dir()
        .map(|dir| dir.join("PitchSigns").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = rolling::daily(&log_dir, "pitch-signs.log");

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // In debug builds, also log to console
    #[cfg(debug_assertions)]
    {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .init();
    }

    // In release builds, only log to file
    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();
    }

    tracing::info!("Log directory: {}", log_dir.display());
}

fn log_runtime_environment() {
    let mut system = System::new_all();
    system.refresh_all();

    let version = env!("CARGO_PKG_VERSION");
    let os_name = System::long_os_version()
        .or_else(System::name)
        .unwrap_or_else(|| "Unknown OS".to_string());
    let kernel = System::kernel_version().unwrap_or_else(|| "Unknown Kernel".to_string());
    let architecture = std::env::consts::ARCH;

    tracing::info!(target: LOG_TARGET_STARTUP, "Starting Pitch Signs v{} on ({})", version, architecture);
    tracing::info!(target: LOG_TARGET_STARTUP, "Operating System: {} (kernel {})", os_name, kernel);
}

/// Build the cue collaborator from config, falling back to silence when
/// audio is unavailable. A missing cue never blocks the session.
fn build_cue(config: &Config) -> Box<dyn SignCue> {
    if !config.cue_enabled {
        return Box::new(SilentCue);
    }

    if let Some(path) = &config.cue_file {
        match FileCue::new(path, config.cue_volume) {
            Ok(cue) => return Box::new(cue),
            Err(e) => {
                tracing::warn!("Custom cue unavailable, falling back to tone: {}", e);
            }
        }
    }

    match BeepCue::new(config.cue_volume) {
        Ok(cue) => Box::new(cue),
        Err(e) => {
            tracing::warn!("Audio output unavailable, cue disabled: {}", e);
            Box::new(SilentCue)
        }
    }
}

fn main() -> AppResult<()> {
    initialize_tracing();
    log_runtime_environment();

    println!("===========================================");
    println!("  Pitch Signs - Baseball Pitch Randomizer");
    println!("===========================================\n");

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    };

    let database = match PitchDatabase::load() {
        Ok(database) => database,
        Err(e) => {
            tracing::warn!("Failed to load pitch database, using embedded default: {}", e);
            PitchDatabase::load_embedded()?
        }
    };

    let mut session = SessionState::from_database(database);
    let cue = build_cue(&config);
    let mut rng = rand::thread_rng();

    println!(
        "✓ Catalog loaded: {} categories, {} pitches selected",
        session.catalog().categories.len(),
        session.selected_pitches().len()
    );
    println!("✓ {} saved combinations", session.saved_combinations().len());
    println!("\nPress Enter to draw a sign, or type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("[{}] > ", session.count());
        io::stdout().flush().ok();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => break,
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(msg) => {
                println!("✗ {}", msg);
                continue;
            }
        };

        tracing::debug!("Executing command: {}", command.description());
        if !execute(command, &mut session, cue.as_ref(), &mut rng) {
            break;
        }
    }

    println!("\nGood game.");
    Ok(())
}

/// Apply one command to the session. Returns false when the session ends.
fn execute(
    command: Command,
    session: &mut SessionState,
    cue: &dyn SignCue,
    rng: &mut ThreadRng,
) -> bool {
    match command {
        Command::Draw => match session.draw_sign(rng) {
            Ok(sign) => {
                cue.play();
                render_sign(&sign);
            }
            Err(e) => println!("✗ {}", e),
        },
        Command::Ball => {
            let outcome = session.add_ball();
            render_count_outcome(session, outcome);
        }
        Command::Strike => {
            let outcome = session.add_strike();
            render_count_outcome(session, outcome);
        }
        Command::ResetCount => {
            session.reset_count();
            println!("Count reset: {}", session.count());
        }
        Command::Toggle { category, pitch } => match session.toggle_pitch(category, pitch) {
            Ok(selected) => {
                println!(
                    "{} pitch {} in category {}",
                    if selected { "Selected" } else { "Deselected" },
                    pitch,
                    category
                );
            }
            Err(e) => println!("✗ {}", e),
        },
        Command::Pitches => render_catalog(session),
        Command::Save { name } => match session.save_combination(&name) {
            Ok(combo) => println!("✓ Saved '{}' ({} pitches)", combo.name, combo.pitches.len()),
            Err(e) => println!("✗ {}", e),
        },
        Command::Load { index } => match session.load_combination(index) {
            Ok(combo) => println!("✓ Loaded '{}'", combo.name),
            Err(e) => println!("✗ {}", e),
        },
        Command::Delete { index } => match session.delete_combination(index) {
            Ok(combo) => println!("✓ Deleted '{}'", combo.name),
            Err(e) => println!("✗ {}", e),
        },
        Command::Combos => render_combos(session),
        Command::History => render_history(session),
        Command::Help => render_help(),
        Command::Quit => return false,
    }
    true
}

fn render_sign(sign: &Sign) {
    println!();
    println!(
        "  {} ({}) — {}",
        sign.pitch,
        sign.category,
        if sign.is_strike { "STRIKE zone" } else { "ball" }
    );
    println!("  {} at {}", sign.time_display(), sign.location);
    println!();

    for row in 0..GRID_SIZE {
        print!("  ");
        for col in 0..GRID_SIZE {
            let here = GridLocation { row, col };
            let mark = if row == sign.location.row && col == sign.location.col {
                'X'
            } else if here.is_in_strike_zone() {
                'o'
            } else {
                '.'
            };
            print!("{} ", mark);
        }
        println!();
    }
    println!();
}

fn render_count_outcome(session: &SessionState, outcome: AtBatOutcome) {
    match outcome {
        AtBatOutcome::InProgress => println!("Count: {}", session.count()),
        AtBatOutcome::Walk => println!("Ball four — walk. Count reset: {}", session.count()),
        AtBatOutcome::Strikeout => {
            println!("Strike three — strikeout. Count reset: {}", session.count())
        }
    }
}

fn render_catalog(session: &SessionState) {
    for (ci, category) in session.catalog().categories.iter().enumerate() {
        println!("[{}] {}", ci, category.name);
        for (pi, pitch) in category.pitches.iter().enumerate() {
            println!(
                "    [{}] {} {}",
                pi,
                if pitch.selected { "[x]" } else { "[ ]" },
                pitch.name
            );
        }
    }
    println!(
        "{} selected — 'toggle <category> <pitch>' to change",
        session.selected_pitches().len()
    );
}

fn render_combos(session: &SessionState) {
    if session.saved_combinations().is_empty() {
        println!("No saved combinations.");
        return;
    }
    for (i, combo) in session.saved_combinations().iter().enumerate() {
        println!("[{}] {} — {}", i, combo.name, combo.pitches.join(", "));
    }
}

fn render_history(session: &SessionState) {
    if session.history().is_empty() {
        println!("No signs drawn yet.");
        return;
    }
    for (i, sign) in session.history().iter().enumerate() {
        println!(
            "[{}] {} {} ({}) — {}",
            i,
            sign.time_display(),
            sign.pitch,
            sign.category,
            if sign.is_strike { "strike zone" } else { "ball" }
        );
    }
}

fn render_help() {
    println!("Commands:");
    println!("  <Enter> / draw     draw the next sign");
    println!("  ball | strike      adjust the count (resets on walk/strikeout)");
    println!("  reset              reset the count to 0-0");
    println!("  pitches            show the catalog with indices");
    println!("  toggle <c> <p>     toggle a pitch's selection");
    println!("  save <name>        save the current selection");
    println!("  combos             list saved combinations");
    println!("  load <i>           load a combination (overwrites selection)");
    println!("  delete <i>         delete a combination");
    println!("  history            show the last ten signs");
    println!("  quit               leave the session");
}
