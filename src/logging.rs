use crate::cli::json_log_behaviour::JsonLogBehaviour;
use chrono::Local;
use eyre::Result;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;
use tracing::Subscriber;
use tracing::debug;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::DefaultFields;
use tracing_subscriber::fmt::format::Format;
use tracing_subscriber::fmt::format::Json;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize tracing subscriber with the given log level and optional JSON output.
///
/// A human-friendly stderr layer is always registered so diagnostics never mix
/// with the teed stdout stream. A JSON file layer is added when `json_behaviour`
/// requests an output path. `RUST_LOG` overrides `level` when set.
///
/// # Errors
///
/// Returns an error if directory creation or file access for the JSON log fails.
/// If initializing the global subscriber fails (commonly in test environments
/// where multiple test harnesses attempt to initialize tracing), the function
/// prints a diagnostic to stderr and returns Ok(()) so callers can continue.
pub fn init_tracing(level: Level, json_behaviour: &JsonLogBehaviour) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::builder().parse_lossy(level.to_string()));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(cfg!(debug_assertions))
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .pretty();

    let json_log = create_json_log_file(json_behaviour)?;
    let json_log_path = json_log.as_ref().map(|(path, _)| path.clone());
    let json_file_layer = json_log.map(|(_, file)| json_layer(file));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(json_file_layer);
    if let Err(error) = subscriber.try_init() {
        eprintln!(
            "Failed to initialize tracing subscriber - are you running `cargo test`? If so, multiple test entrypoints may be running from the same process. https://github.com/tokio-rs/console/issues/505 : {error}"
        );
        return Ok(());
    }

    if let Some(json_log_path) = json_log_path {
        info!(path = %json_log_path.display(), "JSON log output initialized");
    }
    debug!("Tracing initialized with level: {:?}", level);
    Ok(())
}

/// Create the JSON log file requested by `json_behaviour`, along with its parent directories.
fn create_json_log_file(json_behaviour: &JsonLogBehaviour) -> Result<Option<(PathBuf, File)>> {
    let Some(json_log_path) = json_behaviour.get_path() else {
        return Ok(None);
    };
    let json_log_path = json_log_path.into_owned();
    if let Some(parent) = json_log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(&json_log_path)?;
    Ok(Some((json_log_path, file)))
}

fn json_layer<S>(file: File) -> fmt::Layer<S, DefaultFields, Format<Json>, Mutex<File>>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::layer()
        .event_format(fmt::format().json())
        .with_file(true)
        .with_target(false)
        .with_line_number(true)
        .with_writer(Mutex::new(file))
}

/// Return a default JSON log path when the user requests automatic JSON path selection.
///
/// The format uses a timestamp to avoid collisions: `console_tee_log_{TIMESTAMP}.jsonl`
#[must_use]
pub fn default_json_log_path() -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%Hh%Mm%Ss");
    PathBuf::from(format!("console_tee_log_{timestamp}.jsonl"))
}
