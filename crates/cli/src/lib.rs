//! Terminal front end for the haversack inventory tracker.

pub mod app;
pub mod args;
pub mod config;
pub mod log_writer;
pub mod render;
pub mod session;

pub use app::run;
pub use args::{ArgsError, StartupConfig, parse_args};
pub use config::AppConfig;
pub use log_writer::{CampSnapshot, JsonLinesLogWriter, LogError, LogWriter, NoopLogWriter};
pub use session::Session;
