//! Screen implementations

mod log_browser;

pub use log_browser::LogBrowserScreen;
