//! Background controller that keeps a [`LevelSwitch`] in sync with an
//! external authority.
//!
//! The authority itself (the Seq backend's `/api/minimumlevel` endpoint, a
//! control file, an admin socket) lives outside the core; anything that can
//! answer "what should the minimum level be right now" implements
//! [`LevelAuthority`].

use super::{Level, LevelSwitch};
use crate::error::Error;
use crate::selflog;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Answers the current externally configured minimum level.
pub trait LevelAuthority: Send + Sync {
    /// The level the authority currently mandates.
    ///
    /// # Errors
    /// Returns an error when the authority is unreachable; the controller
    /// keeps the previous level and invokes the error callback.
    fn current_level(&self) -> Result<Level, Error>;
}

/// Callback invoked when an authority poll fails.
pub type ErrorCallback = Box<dyn Fn(&Error) + Send + Sync>;

/// Knobs for [`LevelController::start`].
pub struct ControllerOptions {
    /// How often the authority is polled.
    pub interval: Duration,
    /// Poll once immediately instead of waiting a full interval first.
    pub initial_check: bool,
    /// Invoked on every failed poll; the previous level is retained.
    pub on_error: Option<ErrorCallback>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            initial_check: true,
            on_error: None,
        }
    }
}

/// Periodically polls a [`LevelAuthority`] and applies changes to a switch.
///
/// The poll loop runs on a named background thread and sleeps in short ticks
/// so [`close`](Self::close) returns promptly.
pub struct LevelController {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl LevelController {
    /// Spawns the polling thread.
    #[must_use]
    pub fn start(
        switch: Arc<LevelSwitch>,
        authority: Arc<dyn LevelAuthority>,
        options: ControllerOptions,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("mtlog-level-controller".to_string())
            .spawn(move || {
                run(&switch, authority.as_ref(), &options, &thread_stop);
            })
            .ok();
        if handle.is_none() && selflog::is_enabled() {
            selflog::report("level-controller", "failed to spawn controller thread");
        }
        Self {
            stop,
            handle,
        }
    }

    /// Cancels the polling thread and waits for it to exit.
    pub fn close(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for LevelController {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run(
    switch: &LevelSwitch,
    authority: &dyn LevelAuthority,
    options: &ControllerOptions,
    stop: &AtomicBool,
) {
    const TICK: Duration = Duration::from_millis(20);

    if options.initial_check {
        poll(switch, authority, options);
    }
    let mut last = Instant::now();
    while !stop.load(Ordering::Relaxed) {
        thread::sleep(TICK.min(options.interval));
        if stop.load(Ordering::Relaxed) {
            return;
        }
        if last.elapsed() >= options.interval {
            poll(switch, authority, options);
            last = Instant::now();
        }
    }
}

fn poll(switch: &LevelSwitch, authority: &dyn LevelAuthority, options: &ControllerOptions) {
    match authority.current_level() {
        Ok(level) => {
            if switch.level() != level {
                if selflog::is_enabled() {
                    selflog::report(
                        "level-controller",
                        &format!("minimum level changed to {level}"),
                    );
                }
                switch.set_level(level);
            }
        }
        Err(e) => {
            if let Some(on_error) = &options.on_error {
                on_error(&e);
            } else if selflog::is_enabled() {
                selflog::report("level-controller", &format!("poll failed: {e}"));
            }
        }
    }
}
