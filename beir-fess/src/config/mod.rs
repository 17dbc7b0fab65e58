//! Configuration loading for the runner.

mod settings;

pub use settings::Settings;
