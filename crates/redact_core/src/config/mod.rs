//! Configuration management.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Defaults for every key (tone 1000 Hz @ 44.1 kHz, MP3 output)
//! - Atomic file writes (write to temp, then rename)
//!
//! # Example
//!
//! ```no_run
//! use redact_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new("redact.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Tone: {} Hz", config.settings().tone.frequency_hz);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    LoggingSettings, OutputSettings, PathSettings, Settings, ToneSettings, ToolSettings,
};
