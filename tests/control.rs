//! Tests for the level switch and the remote level controller.

use mtlog::{ControllerOptions, Level, LevelAuthority, LevelController, LevelSwitch};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct FixedAuthority {
    level: Mutex<Level>,
    polls: AtomicUsize,
}

impl FixedAuthority {
    fn shared(level: Level) -> Arc<Self> {
        Arc::new(Self {
            level: Mutex::new(level),
            polls: AtomicUsize::new(0),
        })
    }

    fn set(&self, level: Level) {
        *self.level.lock().unwrap() = level;
    }
}

impl LevelAuthority for FixedAuthority {
    fn current_level(&self) -> Result<Level, mtlog::Error> {
        self.polls.fetch_add(1, Ordering::Relaxed);
        Ok(*self.level.lock().unwrap())
    }
}

struct BrokenAuthority;

impl LevelAuthority for BrokenAuthority {
    fn current_level(&self) -> Result<Level, mtlog::Error> {
        Err(mtlog::Error::Config("authority unreachable".to_string()))
    }
}

fn wait_until(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let deadline = std::time::Instant::now() + timeout;
    while std::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    check()
}

#[test]
fn switch_updates_are_visible_to_readers() {
    let switch = LevelSwitch::new(Level::Information);
    assert!(switch.is_enabled(Level::Warning));
    assert!(!switch.is_enabled(Level::Debug));
    switch.set_level(Level::Debug);
    assert_eq!(switch.level(), Level::Debug);
    assert!(switch.is_enabled(Level::Debug));
}

#[test]
fn initial_check_applies_the_authority_level() {
    let switch = Arc::new(LevelSwitch::new(Level::Information));
    let authority = FixedAuthority::shared(Level::Error);
    let controller = LevelController::start(
        switch.clone(),
        authority,
        ControllerOptions {
            interval: Duration::from_secs(60),
            initial_check: true,
            on_error: None,
        },
    );
    assert!(wait_until(Duration::from_secs(1), || {
        switch.level() == Level::Error
    }));
    controller.close();
}

#[test]
fn periodic_polls_pick_up_changes() {
    let switch = Arc::new(LevelSwitch::new(Level::Information));
    let authority = FixedAuthority::shared(Level::Information);
    let controller = LevelController::start(
        switch.clone(),
        authority.clone(),
        ControllerOptions {
            interval: Duration::from_millis(30),
            initial_check: false,
            on_error: None,
        },
    );
    authority.set(Level::Verbose);
    assert!(wait_until(Duration::from_secs(2), || {
        switch.level() == Level::Verbose
    }));
    controller.close();
    assert!(authority.polls.load(Ordering::Relaxed) >= 1);
}

#[test]
fn poll_failures_invoke_the_callback_and_keep_the_level() {
    let switch = Arc::new(LevelSwitch::new(Level::Warning));
    let failures = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&failures);
    let controller = LevelController::start(
        switch.clone(),
        Arc::new(BrokenAuthority),
        ControllerOptions {
            interval: Duration::from_millis(20),
            initial_check: true,
            on_error: Some(Box::new(move |_e| {
                counted.fetch_add(1, Ordering::Relaxed);
            })),
        },
    );
    assert!(wait_until(Duration::from_secs(2), || {
        failures.load(Ordering::Relaxed) >= 2
    }));
    assert_eq!(switch.level(), Level::Warning);
    controller.close();
}

#[test]
fn close_stops_polling() {
    let switch = Arc::new(LevelSwitch::new(Level::Information));
    let authority = FixedAuthority::shared(Level::Information);
    let controller = LevelController::start(
        switch,
        authority.clone(),
        ControllerOptions {
            interval: Duration::from_millis(10),
            initial_check: false,
            on_error: None,
        },
    );
    std::thread::sleep(Duration::from_millis(50));
    controller.close();
    let after_close = authority.polls.load(Ordering::Relaxed);
    std::thread::sleep(Duration::from_millis(60));
    assert_eq!(authority.polls.load(Ordering::Relaxed), after_close);
}
