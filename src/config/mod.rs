//! Configuration loading

mod settings;

pub use settings::{BackendSettings, ServerSettings, Settings};
