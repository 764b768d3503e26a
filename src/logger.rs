use chrono::Local;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs;
use std::path::Path;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "fog_parking.log";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sets up colored console logging plus `logs/fog_parking.log`.
/// The level comes from `RUST_LOG` (default `info`).
pub fn init() {
    let level = level_filter(std::env::var("RUST_LOG").ok().as_deref());
    let log_file_path = Path::new(LOG_DIR).join(LOG_FILE);

    let mut dispatch = Dispatch::new().level(level).level_for("csv", LevelFilter::Warn).chain(console_dispatch());

    match file_dispatch(&log_file_path) {
        Ok(file) => dispatch = dispatch.chain(file),
        Err(e) => eprintln!("Logging to console only, '{}' is not writable: {}", log_file_path.display(), e),
    }

    // tests may initialise more than once per process
    if let Err(e) = dispatch.apply() {
        eprintln!("Logger already initialised: {}", e);
        return;
    }

    log::info!("Logger initialized, writing to '{}'.", log_file_path.display());
}

/// Unknown or missing level names fall back to `info`.
fn level_filter(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|value| value.parse::<LevelFilter>().ok()).unwrap_or(LevelFilter::Info)
}

fn console_dispatch() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!("[{} {} {}] {}", Local::now().format(TIME_FORMAT), colors.color(record.level()), record.target(), message))
        })
        .chain(std::io::stderr())
}

fn file_dispatch(path: &Path) -> std::io::Result<Dispatch> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fern::log_file(path)?;

    Ok(Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{} {} {}] {}", Local::now().format(TIME_FORMAT), record.level(), record.target(), message))
        })
        .chain(file))
}
