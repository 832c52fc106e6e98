/*!
 * Common test utilities for the fusionn test suite
 */

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::net::TcpListener;
use std::sync::{Arc, Once};

use fusionn::Controller;
use fusionn::app_config::WorkflowConfig;


pub use mock_service::{MockReply, MockService};

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

static INIT_LOGGING: Once = Once::new();

/// Forwards to env_logger and records this crate's records per thread
struct CapturingLogger {
    inner: env_logger::Logger,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.target().starts_with("fusionn") {
            CAPTURED.with(|c| c.borrow_mut().push((record.level(), record.args().to_string())));
        }
        self.inner.log(record);
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Route test logs through env_logger; safe to call from every test
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let inner = env_logger::Builder::from_default_env().is_test(true).build();
        if log::set_boxed_logger(Box::new(CapturingLogger { inner })).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}

/// Drain the records logged on the current thread.
///
/// Only sees records from current-thread runtimes, where spawned tasks
/// share the test thread.
pub fn take_logs() -> Vec<(Level, String)> {
    CAPTURED.with(|c| std::mem::take(&mut *c.borrow_mut()))
}

/// Messages logged at error level on the current thread
pub fn take_error_logs() -> Vec<String> {
    take_logs().into_iter()
        .filter(|(level, _)| *level == Level::Error)
        .map(|(_, message)| message)
        .collect()
}

/// Controller backed by `service` with default workflow settings
pub fn controller_with(service: &Arc<MockService>) -> Controller {
    controller_with_settings(service, WorkflowConfig::default())
}

pub fn controller_with_settings(service: &Arc<MockService>, settings: WorkflowConfig) -> Controller {
    init_logging();
    Controller::new(settings, service.clone())
}

/// A local port with nothing listening on it
pub fn unused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    port
}
