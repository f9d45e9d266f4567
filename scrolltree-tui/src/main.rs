mod outline;
mod paths;
mod reveal;
mod settings;

use std::cell::RefCell;
use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::Path;
use std::process::ExitCode;
use std::rc::Rc;

use log::LevelFilter;
use scrolltree::{handle_key, Cursor, Key, Terminal, Viewport};
use serde_json::Value;
use simplelog::{Config, WriteLogger};
use thiserror::Error;

use crate::outline::build_outline;
use crate::reveal::Revealer;
use crate::settings::{Settings, SettingsError};

#[derive(Debug, Error)]
enum AppError {
    #[error("cannot read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("{path} is not valid JSON: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Tree(#[from] scrolltree::Error),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: scrolltree-tui <file.json>");
        return ExitCode::FAILURE;
    };

    let (settings, settings_error) = load_settings();
    init_logging(settings.log_level());
    if let Some(e) = settings_error {
        log::warn!("[settings] {e}; using defaults");
    }
    log::info!("[main] opening {path} with {settings:?}");

    match run(Path::new(&path), &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("[main] {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_settings() -> (Settings, Option<SettingsError>) {
    let Some(path) = paths::settings_file() else {
        return (Settings::default(), None);
    };
    match Settings::load(&path) {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    }
}

/// Log to `latest.log` in the cache dir; never to the terminal, which is in
/// raw mode while the outline is shown.
fn init_logging(level: LevelFilter) {
    paths::rotate_logs();
    let Some(log_path) = paths::log_file() else { return };
    if let Ok(log_file) = File::create(log_path) {
        let _ = WriteLogger::init(level, Config::default(), log_file);
    }

    // Panics contained by the cursor still run the hook; keep them in the log
    panic::set_hook(Box::new(|panic_info| {
        log::error!("[panic] {panic_info}");
    }));
}

fn run(path: &Path, settings: &Settings) -> Result<(), AppError> {
    let shown = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| AppError::Read {
        path: shown.clone(),
        source,
    })?;
    let document: Value = serde_json::from_str(&text).map_err(|source| AppError::Json {
        path: shown.clone(),
        source,
    })?;

    let title = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or(shown);
    let tree = build_outline(&title, &document);
    log::info!("[main] outline has {} nodes", tree.len());

    let viewport = Viewport::new(settings.line_count, settings.width)?;
    let failure = Rc::new(RefCell::new(None));
    let sink = failure.clone();
    let mut cursor = Cursor::new(tree).on_error(move |action_failure| {
        *sink.borrow_mut() = Some(action_failure.kind.to_string());
    });
    let mut revealer = Revealer::new(&document);

    let mut terminal = Terminal::new()?;
    loop {
        {
            let rows = viewport.render(&cursor);
            terminal.draw(&rows, revealer.status())?;
        }

        let Some(key) = terminal.read_key()? else { continue };
        match key {
            Key::Char('q') | Key::Escape => break,
            _ => {
                handle_key(&mut cursor, key, &mut revealer);
            }
        }

        if let Some(message) = failure.borrow_mut().take() {
            revealer.set_status(message);
        }
    }

    log::info!("[main] quit");
    Ok(())
}
