//! Test helpers for checking what the converters report.
//!
//! A process-wide `log::Log` that records into thread-local storage, so
//! tests running in parallel each see only their own records.

use std::cell::RefCell;

use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;

struct CaptureLogger;

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        RECORDS.with(|r| {
            r.borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

static INSTALLED: Lazy<()> = Lazy::new(|| {
    log::set_logger(&LOGGER).expect("another logger is installed");
    log::set_max_level(LevelFilter::Trace);
});

/// Run `f`, returning its result and the log records it emitted on this thread.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
    Lazy::force(&INSTALLED);
    RECORDS.with(|r| r.borrow_mut().clear());
    let value = f();
    let records = RECORDS.with(|r| r.borrow_mut().drain(..).collect());
    (value, records)
}

/// Records at `level` whose message starts with `prefix`.
pub fn count_logs(records: &[(Level, String)], level: Level, prefix: &str) -> usize {
    records
        .iter()
        .filter(|(l, msg)| *l == level && msg.starts_with(prefix))
        .count()
}
