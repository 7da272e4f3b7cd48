pub mod config;
pub mod context;
pub mod logging;
pub mod report;
pub mod retry;
pub mod state;
pub mod utils;

pub use config::Settings;
pub use report::{ConsoleFormatter, Reporter, ResultRecorder, SimplifiedReporter, SuiteOptions};
pub use retry::SuiteRetries;
pub use state::TestResults;
