//! Persisted selection state.
//!
//! The only thing remembered across restarts is which config file was
//! selected last. Where it lives is up to the host, so the provider talks to
//! a [`SettingsStore`].

use crate::error::{HsvError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key-value storage for the remembered config file path.
pub trait SettingsStore {
	/// The remembered config file path, if any.
	fn config_file_path(&self) -> Option<PathBuf>;

	/// Remember a config file path, or forget it with `None`.
	fn set_config_file_path(&mut self, path: Option<PathBuf>) -> Result<()>;
}

/// On-disk settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
	#[serde(rename = "ConfigFilePath", default, skip_serializing_if = "Option::is_none")]
	pub config_file_path: Option<PathBuf>,
}

/// Settings stored in a TOML file, written through on every change.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
	path: PathBuf,
	settings: Settings,
}

impl FileSettingsStore {
	/// Open the settings file, starting empty if it doesn't exist yet.
	///
	/// A file that can't be read or parsed is logged and treated as empty, so
	/// a damaged settings file only loses the remembered selection.
	pub fn open(path: &Path) -> Self {
		let settings = if path.exists() {
			match Self::load(path) {
				Ok(settings) => settings,
				Err(e) => {
					warn!(path = %path.display(), error = %e, "Ignoring unreadable settings file");
					Settings::default()
				}
			}
		} else {
			Settings::default()
		};

		Self {
			path: path.to_path_buf(),
			settings,
		}
	}

	fn load(path: &Path) -> Result<Settings> {
		let content =
			std::fs::read_to_string(path).map_err(|source| HsvError::SettingsReadError {
				path: path.to_path_buf(),
				source,
			})?;
		toml::from_str(&content).map_err(|source| HsvError::SettingsParseError {
			path: path.to_path_buf(),
			source,
		})
	}

	fn save(&self) -> Result<()> {
		if let Some(parent) = self.path.parent()
			&& !parent.as_os_str().is_empty()
		{
			std::fs::create_dir_all(parent).map_err(|source| HsvError::SettingsWriteError {
				path: self.path.clone(),
				source,
			})?;
		}

		let content = toml::to_string_pretty(&self.settings)
			.map_err(|source| HsvError::SettingsSerializeError { source })?;

		std::fs::write(&self.path, content).map_err(|source| HsvError::SettingsWriteError {
			path: self.path.clone(),
			source,
		})?;

		debug!(path = %self.path.display(), "Saved settings");
		Ok(())
	}
}

impl SettingsStore for FileSettingsStore {
	fn config_file_path(&self) -> Option<PathBuf> {
		self.settings.config_file_path.clone()
	}

	fn set_config_file_path(&mut self, path: Option<PathBuf>) -> Result<()> {
		self.settings.config_file_path = path;
		self.save()
	}
}

/// Settings kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
	settings: Settings,
}

impl MemorySettingsStore {
	pub fn new(config_file_path: Option<PathBuf>) -> Self {
		Self {
			settings: Settings { config_file_path },
		}
	}
}

impl SettingsStore for MemorySettingsStore {
	fn config_file_path(&self) -> Option<PathBuf> {
		self.settings.config_file_path.clone()
	}

	fn set_config_file_path(&mut self, path: Option<PathBuf>) -> Result<()> {
		self.settings.config_file_path = path;
		Ok(())
	}
}
