//! Configuration module for FinDash
//!
//! Platform path resolution and user settings persistence.

pub mod paths;
pub mod settings;

pub use paths::FinDashPaths;
pub use settings::Settings;
