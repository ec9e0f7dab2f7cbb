//! Tests for the selflog diagnostic channel.
//!
//! Selflog state is process-global, so everything runs in one test function
//! to keep enable/disable transitions ordered.

use mtlog::{Level, Logger, MemorySink, Value, selflog};
use std::sync::{Arc, Mutex};

#[test]
fn selflog_lifecycle_and_diagnostics() {
    // Disabled by default; reports are dropped silently.
    assert!(!selflog::is_enabled());
    selflog::report("test", "goes nowhere");

    // Callback target receives formatted lines.
    let lines: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&lines);
    selflog::enable_fn(move |line| captured.lock().unwrap().push(line.to_string()));
    assert!(selflog::is_enabled());

    selflog::report("unit", "hello diagnostics");
    {
        let seen = lines.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("mtlog [unit] hello diagnostics"));
    }

    // Corrected sampling misuse is reported through the channel.
    let sink = MemorySink::shared();
    let log = Logger::builder()
        .minimum_level(Level::Verbose)
        .sink_shared(sink.clone())
        .build();
    let silenced = log.sample_first(0);
    silenced.information("never emitted", &[]);
    assert!(
        lines
            .lock()
            .unwrap()
            .iter()
            .any(|l| l.contains("sample_first(0)"))
    );

    // Empty `with` keys are dropped and diagnosed.
    let _ = log.with(&[("", Value::from(1))]);
    assert!(
        lines
            .lock()
            .unwrap()
            .iter()
            .any(|l| l.contains("empty key"))
    );

    // Reserved-name shadowing is allowed but diagnosed.
    let shadowed = log.with(&[("SourceContext", Value::from("manual"))]);
    shadowed.information("ok", &[]);
    assert_eq!(
        sink.events().last().unwrap().property("SourceContext"),
        Some(&Value::from("manual"))
    );
    assert!(
        lines
            .lock()
            .unwrap()
            .iter()
            .any(|l| l.contains("SourceContext"))
    );

    // Sink failures surface here with the sink's name.
    struct Failing;
    impl mtlog::Sink for Failing {
        fn emit(&self, _event: &mtlog::LogEvent) -> Result<(), mtlog::Error> {
            Err(mtlog::Error::Format("disk gone".to_string()))
        }
        fn name(&self) -> &'static str {
            "flaky-disk"
        }
    }
    let failing = Logger::builder()
        .minimum_level(Level::Verbose)
        .sink(Failing)
        .build();
    failing.information("write me {X}", &[Value::from(1)]);
    assert!(
        lines
            .lock()
            .unwrap()
            .iter()
            .any(|l| l.contains("flaky-disk"))
    );

    // Writer targets work too, and formatting stops after disable.
    let before = lines.lock().unwrap().len();
    selflog::disable();
    assert!(!selflog::is_enabled());
    selflog::report("unit", "after disable");
    assert_eq!(lines.lock().unwrap().len(), before);

    // Without the environment variable, init is a quiet no-op.
    if std::env::var(selflog::SELFLOG_ENV).is_err() {
        assert_eq!(selflog::init_from_env().unwrap(), false);
    }
}
