//! hsv-config - config engine for HitScoreVisualizer judgment configs.
//!
//! This library provides:
//! - The versioned judgment config schema and its JSON file format
//! - Validation and classification of config files against the plugin version
//! - Ordered schema migrations
//! - Discovery, selection, and restoring of the active config
//!
//! # Example
//!
//! ```no_run
//! use hsv_config::provider::ConfigProvider;
//! use hsv_config::settings::FileSettingsStore;
//! use hsv_config::{PLUGIN_VERSION, paths};
//!
//! let settings = FileSettingsStore::open(&paths::default_settings_path().unwrap());
//! let config_dir = paths::default_config_dir().unwrap();
//! let mut provider = ConfigProvider::new(&config_dir, PLUGIN_VERSION, settings).unwrap();
//!
//! provider.initialize();
//!
//! for info in provider.list_available_configs().unwrap() {
//!     println!("{}: {}", info.name, info.state);
//! }
//!
//! let active = provider.current_or_default();
//! println!("Using config version {}", active.version);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod migration;
pub mod paths;
pub mod provider;
pub mod settings;
pub mod version;

pub use error::{HsvError, Result};
pub use version::{PLUGIN_VERSION, Version};
