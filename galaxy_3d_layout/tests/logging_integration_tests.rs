//! Integration tests for Engine logging system
//!
//! Checks what layout synthesis reports through a custom logger.
//! No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests

mod layout_test_utils;

use galaxy_3d_layout::galaxy3d::Engine;
use galaxy_3d_layout::galaxy3d::log::{Logger, LogEntry, LogSeverity};
use galaxy_3d_layout::galaxy3d::layout::{ShaderStage, ShaderStageModule};
use galaxy_3d_layout::galaxy3d::reflect::LayoutAssembler;
use layout_test_utils::{TestIntrospector, TestStage};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn restore() {
    Engine::reset_logger();
    Engine::set_min_severity(LogSeverity::Info);
}

// ============================================================================
// TESTS
// ============================================================================

#[test]
#[serial]
fn test_validation_error_is_logged_with_location() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    let mut introspector = TestIntrospector::new();
    let vs = introspector.add(TestStage::new(ShaderStage::Vertex));
    let modules = [ShaderStageModule::new(&vs, ShaderStage::Vertex, "main")];
    let result = LayoutAssembler::default().assemble(&introspector, &modules);

    let captured = entries.lock().unwrap().clone();
    restore();

    assert!(result.is_err());
    let error = captured
        .iter()
        .find(|e| e.severity == LogSeverity::Error)
        .expect("error entry");
    assert_eq!(error.source, "galaxy3d::layout");
    assert!(error.message.contains("Unsupported pipeline shape"));
    assert!(error.file.is_some());
    assert!(error.line.is_some());
}

#[test]
#[serial]
fn test_debug_summary_emitted_when_enabled() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::set_min_severity(LogSeverity::Trace);

    let mut introspector = TestIntrospector::new();
    let vs = introspector.add(TestStage::new(ShaderStage::Vertex).uniform_buffer("Camera", 0, 0));
    let fs = introspector.add(TestStage::new(ShaderStage::Fragment).uniform_buffer("Camera", 0, 0));
    let modules = [
        ShaderStageModule::new(&vs, ShaderStage::Vertex, "main"),
        ShaderStageModule::new(&fs, ShaderStage::Fragment, "main"),
    ];
    LayoutAssembler::default().assemble(&introspector, &modules).unwrap();

    let captured = entries.lock().unwrap().clone();
    restore();

    assert!(captured
        .iter()
        .any(|e| e.severity == LogSeverity::Debug && e.message.starts_with("Assembled Graphics layout")));
    assert!(captured
        .iter()
        .any(|e| e.severity == LogSeverity::Trace && e.source == "galaxy3d::reflect"));
    assert_eq!(
        captured
            .iter()
            .filter(|e| e.severity == LogSeverity::Debug && e.source == "galaxy3d::reflect")
            .count(),
        2
    );
}

#[test]
#[serial]
fn test_default_filter_hides_debug() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    let mut introspector = TestIntrospector::new();
    let cs = introspector.add(TestStage::new(ShaderStage::Compute));
    let modules = [ShaderStageModule::new(&cs, ShaderStage::Compute, "main")];
    LayoutAssembler::default().assemble(&introspector, &modules).unwrap();

    let captured = entries.lock().unwrap().clone();
    restore();

    assert!(captured.iter().all(|e| e.severity >= LogSeverity::Info));
}
