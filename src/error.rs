use std::path::PathBuf;

/// Library-level structured errors for hsv-config.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
///
/// Note that a bad user config file is never an error at the provider level:
/// read and parse failures are captured per file and surface as
/// [`ConfigState::Broken`](crate::config::ConfigState::Broken).
#[derive(Debug, thiserror::Error)]
pub enum HsvError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("Failed to serialize config for: {path}")]
	ConfigSerializeError {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("Failed to write config file: {path}")]
	ConfigWriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to access config directory: {path}")]
	ConfigDirError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read settings file: {path}")]
	SettingsReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse settings file: {path}")]
	SettingsParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to serialize settings")]
	SettingsSerializeError {
		#[source]
		source: toml::ser::Error,
	},

	#[error("Failed to write settings file: {path}")]
	SettingsWriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid version '{input}': expected major.minor.patch")]
	InvalidVersion { input: String },

	#[error("Failed to resolve user data directory")]
	DataDirectoryNotFound,
}

/// Result type alias using HsvError.
pub type Result<T> = std::result::Result<T, HsvError>;
