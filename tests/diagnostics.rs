//! Log lines emitted under each diagnostics flag.

use std::cell::RefCell;

use log::{Level, LevelFilter, Log, Metadata, Record};
use spark_context::{Diagnostics, Tree, TreeConfig, mount};

// Records are kept per thread so parallel tests do not see each other's lines.
thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        CAPTURED.with(|lines| {
            lines
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

fn capture(run: impl FnOnce()) -> Vec<(Level, String)> {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
    CAPTURED.with(|lines| lines.borrow_mut().clear());
    run();
    CAPTURED.with(|lines| lines.take())
}

fn count(lines: &[(Level, String)], level: Level, needle: &str) -> usize {
    lines
        .iter()
        .filter(|(l, line)| *l == level && line.contains(needle))
        .count()
}

#[test]
fn test_overwrite_warns_by_default() {
    let lines = capture(|| {
        let mut tree = Tree::new();
        let root = tree.create_node(None).unwrap();
        tree.register_value(root, "mode", 1u8).unwrap();
        tree.register_value(root, "mode", 2u8).unwrap();
    });

    assert_eq!(count(&lines, Level::Warn, "overwrote its own binding for \"mode\""), 1);
}

#[test]
fn test_overwrite_silent_without_flag() {
    let lines = capture(|| {
        let mut tree =
            Tree::with_config(TreeConfig::default().diagnostics(Diagnostics::empty()));
        let root = tree.create_node(None).unwrap();
        tree.register_value(root, "mode", 1u8).unwrap();
        tree.register_value(root, "mode", 2u8).unwrap();
    });

    assert_eq!(count(&lines, Level::Warn, "overwrote"), 0);
}

#[test]
fn test_mount_lifecycle_logged_with_flag() {
    let lines = capture(|| {
        let handle = mount(
            TreeConfig::new("logged").diagnostics(Diagnostics::TRACE_LIFECYCLE),
            |_| Ok(()),
        )
        .unwrap();
        handle.unmount();
    });

    assert_eq!(count(&lines, Level::Debug, "[logged] mount "), 1);
    assert_eq!(count(&lines, Level::Debug, "[logged] unmount"), 1);
}

#[test]
fn test_mount_lifecycle_silent_without_flag() {
    let lines = capture(|| {
        let handle = mount(
            TreeConfig::new("quiet").diagnostics(Diagnostics::empty()),
            |cx| {
                cx.child(|_| Ok(()))?;
                Ok(())
            },
        )
        .unwrap();
        handle.unmount();
    });

    assert!(lines.is_empty(), "unexpected log lines: {lines:?}");
}
