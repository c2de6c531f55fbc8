//! Binary entry point: CLI, logging, terminal setup and teardown.

mod display;
mod input;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};

use alien_invasion::compute::init_state;
use alien_invasion::game;
use alien_invasion::settings::Settings;

use crate::display::TerminalFrontend;

/// Alien Invasion in the terminal.
#[derive(Parser, Debug)]
#[command(name = "alien_invasion", version)]
struct Cli {
    /// JSON settings file; missing fields keep their defaults
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs here (filtered by RUST_LOG). The terminal is taken by the game.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,
}

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_json_file(path)?,
        None => Settings::default(),
    };
    if let Some(fps) = cli.fps {
        settings.target_fps = fps;
        settings.validate()?;
    }
    Ok(settings)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    let settings = load_settings(&cli)?;
    log::info!("Alien Invasion starting at {} FPS", settings.target_fps);

    let mut state = init_state(settings);
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    let keyboard_enhanced = enable_key_releases(&mut out);
    log::info!("Keyboard enhancement: {keyboard_enhanced}");

    let rx = input::spawn_reader();

    let result = TerminalFrontend::new(&mut out, rx, keyboard_enhanced, state.settings())
        .and_then(|mut frontend| {
            let run = game::run(&mut state, &mut frontend);
            let released = frontend.release();
            run.and(released)
        });

    restore_terminal(&mut out, keyboard_enhanced);
    result.context("game loop failed")
}

/// Ask for key-release events when the terminal answers the kitty keyboard
/// query. Writing the flags succeeds on any terminal, so only the query
/// tells whether releases will arrive; without them `KeyUp` is synthesized.
fn enable_key_releases<W: Write>(out: &mut W) -> bool {
    match terminal::supports_keyboard_enhancement() {
        Ok(true) => {}
        Ok(false) => return false,
        Err(err) => {
            log::warn!("Keyboard enhancement query failed: {err}");
            return false;
        }
    }
    match out.execute(PushKeyboardEnhancementFlags(
        KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
    )) {
        Ok(_) => true,
        Err(err) => {
            log::warn!("Enabling key-release events failed: {err}");
            false
        }
    }
}

/// Undo every terminal mode `main` switched on. Runs on success and failure
/// alike, so errors are logged rather than returned.
fn restore_terminal<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        if let Err(err) = out.execute(PopKeyboardEnhancementFlags) {
            log::warn!("Restoring keyboard flags failed: {err}");
        }
    }
    if let Err(err) = out.execute(cursor::Show) {
        log::warn!("Showing cursor failed: {err}");
    }
    if let Err(err) = out.execute(terminal::LeaveAlternateScreen) {
        log::warn!("Leaving alternate screen failed: {err}");
    }
    if let Err(err) = terminal::disable_raw_mode() {
        log::warn!("Disabling raw mode failed: {err}");
    }
}
