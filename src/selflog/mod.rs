//! mtlog's own diagnostic channel.
//!
//! The library never surfaces recoverable failures to the logging caller;
//! anything it would otherwise swallow (sink write errors, template
//! fallbacks, corrected sampling arguments) goes here instead. Disabled by
//! default: `is_enabled` is a single relaxed atomic load, and callers only
//! format their messages after checking it, so the hot path pays nothing.

use crate::error::Error;
use chrono::{SecondsFormat, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, RwLock};

/// Environment variable choosing the selflog destination at init:
/// `stderr`, `stdout`, or a file path (tilde-expanded).
pub const SELFLOG_ENV: &str = "MTLOG_SELFLOG";

enum Target {
    Writer(Mutex<Box<dyn Write + Send>>),
    Callback(Box<dyn Fn(&str) + Send + Sync>),
}

static ENABLED: AtomicBool = AtomicBool::new(false);
static TARGET: LazyLock<RwLock<Option<Target>>> = LazyLock::new(|| RwLock::new(None));

/// Whether selflog is active. Lock-free; check this before formatting.
#[must_use]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Routes diagnostics to a writer. The writer is wrapped in a mutex, so any
/// `Write + Send` will do.
pub fn enable(writer: impl Write + Send + 'static) {
    let mut target = TARGET.write().expect("selflog target poisoned");
    *target = Some(Target::Writer(Mutex::new(Box::new(writer))));
    drop(target);
    ENABLED.store(true, Ordering::Relaxed);
}

/// Routes diagnostics to a callback receiving each formatted line.
pub fn enable_fn(callback: impl Fn(&str) + Send + Sync + 'static) {
    let mut target = TARGET.write().expect("selflog target poisoned");
    *target = Some(Target::Callback(Box::new(callback)));
    drop(target);
    ENABLED.store(true, Ordering::Relaxed);
}

/// Turns selflog off and drops the target.
pub fn disable() {
    ENABLED.store(false, Ordering::Relaxed);
    let mut target = TARGET.write().expect("selflog target poisoned");
    *target = None;
}

/// Reports one diagnostic line. A no-op while disabled; failures writing the
/// diagnostic itself are ignored, there is nowhere left to report them.
pub fn report(module: &str, message: &str) {
    if !is_enabled() {
        return;
    }
    let line = format!(
        "{} mtlog [{}] {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        module,
        message
    );
    let target = TARGET.read().expect("selflog target poisoned");
    match &*target {
        Some(Target::Writer(writer)) => {
            if let Ok(mut w) = writer.lock() {
                let _ = writeln!(w, "{line}");
            }
        }
        Some(Target::Callback(callback)) => callback(&line),
        None => {}
    }
}

/// Applies `MTLOG_SELFLOG` if set: `stderr`, `stdout`, or a file path.
///
/// Returns whether selflog ended up enabled.
///
/// # Errors
/// Fails when the variable names a file that cannot be opened for append.
pub fn init_from_env() -> Result<bool, Error> {
    let Ok(value) = std::env::var(SELFLOG_ENV) else {
        return Ok(false);
    };
    match value.as_str() {
        "" => Ok(false),
        "stderr" => {
            enable(std::io::stderr());
            Ok(true)
        }
        "stdout" => {
            enable(std::io::stdout());
            Ok(true)
        }
        path => {
            let expanded = shellexpand::tilde(path).into_owned();
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&expanded)?;
            enable(file);
            Ok(true)
        }
    }
}
