use crate::config::types::Configuration;
use crate::error::{HsvError, Result};
use std::path::Path;
use tracing::debug;

/// Outcome of loading one candidate config file.
///
/// Loading never fails outright: a missing file, an unreadable file, and a
/// file that isn't a judgment config at all are all ordinary outcomes.
#[derive(Debug)]
pub enum LoadOutcome {
	/// Nothing exists at the path.
	NotFound,

	/// The file exists but could not be read or parsed.
	Unreadable(HsvError),

	/// The file parsed into a configuration.
	Loaded(Configuration),
}

impl LoadOutcome {
	/// The parsed configuration, if any.
	pub fn into_configuration(self) -> Option<Configuration> {
		match self {
			LoadOutcome::Loaded(config) => Some(config),
			LoadOutcome::NotFound | LoadOutcome::Unreadable(_) => None,
		}
	}
}

/// Load a config file, capturing every failure in the outcome.
pub fn load_config(path: &Path) -> LoadOutcome {
	if !path.exists() {
		return LoadOutcome::NotFound;
	}

	match parse_config_file(path) {
		Ok(config) => LoadOutcome::Loaded(config),
		Err(e) => {
			// Expected for anything in the directory that isn't a judgment config
			debug!(path = %path.display(), error = %e, "Skipping unreadable config file");
			LoadOutcome::Unreadable(e)
		}
	}
}

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Configuration> {
	let content = std::fs::read_to_string(path).map_err(|source| HsvError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Configuration> {
	serde_json::from_str(content).map_err(|source| HsvError::ConfigParseError {
		path: path.to_path_buf(),
		source,
	})
}

/// Serialize a config as indented JSON.
pub fn config_to_string(config: &Configuration, path: &Path) -> Result<String> {
	serde_json::to_string_pretty(config).map_err(|source| HsvError::ConfigSerializeError {
		path: path.to_path_buf(),
		source,
	})
}

/// Write a config file as indented JSON, replacing any existing file.
pub fn write_config_file(path: &Path, config: &Configuration) -> Result<()> {
	let content = config_to_string(config, path)?;
	std::fs::write(path, content).map_err(|source| HsvError::ConfigWriteError {
		path: path.to_path_buf(),
		source,
	})
}
