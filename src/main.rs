mod tick_events;

use clap::Parser;
use crossterm::event::{
    self, DisableFocusChange, EnableFocusChange, Event, KeyEventKind, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use dino_run::build_info;
use dino_run::core::constants::INPUT_POLL_MS;
use dino_run::input::{map_key, ControlState, RunnerInput};
use dino_run::ui::{draw_ui, Hud};
use dino_run::{tick_runner, GameConfig, RunnerScene, SceneVariant};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use thiserror::Error;
use tick_events::apply_tick_events;
use tracing_subscriber::EnvFilter;

/// Dino Run - a terminal side-scrolling runner
#[derive(Parser, Debug)]
#[command(author, about, long_about = None, disable_version_flag = true)]
struct Args {
    /// Seed for cloud placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the dimmed start overlay
    #[arg(long, default_value_t = false)]
    plain: bool,

    /// Write logs to this file (filter with RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Show version information
    #[arg(short = 'v', long)]
    version: bool,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            seed: self.seed,
            variant: if self.plain {
                SceneVariant::Plain
            } else {
                SceneVariant::Prompted
            },
        }
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("could not open log file {}: {source}", path.display())]
    LogFile { path: PathBuf, source: io::Error },
    #[error("failed to install log subscriber: {0}")]
    Logging(String),
}

/// Logs go to a file because the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if args.version {
        println!("dino-run {}", build_info::version_line());
        return Ok(());
    }

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = args.game_config();
    tracing::info!(seed = ?config.seed, variant = config.variant.name(), "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    // Reported so a lost focus can drop a held control
    stdout.execute(EnableFocusChange)?;
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, &config, release_events);

    // Restore terminal before surfacing any error
    if release_events {
        terminal.backend_mut().execute(PopKeyboardEnhancementFlags)?;
    }
    terminal.backend_mut().execute(DisableFocusChange)?;
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match &result {
        Ok(high_score) => tracing::info!(high_score, "exited"),
        Err(e) => tracing::error!("exited with error: {}", e),
    }
    result.map(|_| ())
}

/// Main loop. Returns the session's high score on quit.
fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &GameConfig,
    release_events: bool,
) -> Result<u64, AppError> {
    let mut scene = RunnerScene::new(config);
    let mut hud = Hud::new(config.variant);
    let mut control = if release_events {
        ControlState::with_release_events()
    } else {
        ControlState::new()
    };
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| draw_ui(frame, &scene, &hud))?;
        hud.on_frame();

        // Drain pending input; the first poll paces the loop
        let mut timeout = Duration::from_millis(INPUT_POLL_MS);
        while event::poll(timeout)? {
            timeout = Duration::ZERO;
            match event::read()? {
                Event::Key(key) => match map_key(&key) {
                    RunnerInput::Control => control.handle_event(key.kind, Instant::now()),
                    RunnerInput::Quit if key.kind != KeyEventKind::Release => {
                        return Ok(scene.state.high_score);
                    }
                    _ => {}
                },
                Event::FocusLost => control.clear(),
                _ => {}
            }
        }

        // Carry sub-millisecond remainders into the next frame
        let now = Instant::now();
        let dt_ms = now.duration_since(last_tick).as_millis() as u64;
        last_tick += Duration::from_millis(dt_ms);

        let events = tick_runner(&mut scene, control.is_pressed(now), dt_ms);
        apply_tick_events(&mut hud, &events);
    }
}
