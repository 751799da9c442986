mod config;
mod duplicate_detector;
mod import_engine;
mod persister;

pub use config::{DuplicatePolicy, ImportConfig};
pub use duplicate_detector::DuplicateDetector;
pub use import_engine::{ImportEngine, ImportSummary};
pub use persister::Persister;
