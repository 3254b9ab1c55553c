//! Discovery and selection of user config files.
//!
//! This module handles:
//! - Enumerating and classifying every file in the config directory
//! - Selecting a config, migrating it first when needed
//! - Restoring the remembered selection at startup

pub mod current;

pub use current::CurrentConfig;

use crate::config::{
	ConfigFileInfo, ConfigState, Configuration, LoadOutcome, classify, load_config,
	write_config_file,
};
use crate::error::{HsvError, Result};
use crate::migration::MigrationRegistry;
use crate::settings::SettingsStore;
use crate::version::Version;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owns the config directory, the remembered selection, and the active config.
///
/// Selection takes `&mut self`, so there is a single writer for the active
/// config and the remembered path. Readers hold a [`CurrentConfig`] handle.
pub struct ConfigProvider<S: SettingsStore> {
	config_dir: PathBuf,
	plugin_version: Version,
	migrations: MigrationRegistry,
	settings: S,
	current: CurrentConfig,
}

impl<S: SettingsStore> ConfigProvider<S> {
	/// Create a provider, creating the config directory if it is missing.
	pub fn new(config_dir: &Path, plugin_version: Version, settings: S) -> Result<Self> {
		debug!(path = %config_dir.display(), "Creating configs folder");
		std::fs::create_dir_all(config_dir).map_err(|source| HsvError::ConfigDirError {
			path: config_dir.to_path_buf(),
			source,
		})?;

		Ok(Self {
			config_dir: config_dir.to_path_buf(),
			plugin_version,
			migrations: MigrationRegistry::builtin(),
			settings,
			current: CurrentConfig::new(),
		})
	}

	pub fn config_dir(&self) -> &Path {
		&self.config_dir
	}

	pub fn plugin_version(&self) -> Version {
		self.plugin_version
	}

	/// A handle to the active config for consumers.
	pub fn current(&self) -> CurrentConfig {
		self.current.clone()
	}

	pub fn current_config(&self) -> Option<Arc<Configuration>> {
		self.current.get()
	}

	/// The active config, or the built-in default when none is selected.
	pub fn current_or_default(&self) -> Arc<Configuration> {
		self.current
			.get()
			.unwrap_or_else(|| Arc::new(Configuration::default_config(self.plugin_version)))
	}

	/// Path of the remembered selection.
	pub fn current_config_path(&self) -> Option<PathBuf> {
		self.settings.config_file_path()
	}

	/// Classify a parsed (or absent) config against this provider's plugin version.
	pub fn classify(&self, configuration: Option<&Configuration>) -> ConfigState {
		classify(configuration, self.plugin_version, &self.migrations)
	}

	pub fn is_selectable(&self, state: Option<ConfigState>) -> bool {
		crate::config::is_selectable(state)
	}

	/// Load and classify a single file.
	pub fn load_file_info(&self, path: &Path) -> ConfigFileInfo {
		let configuration = load_config(path).into_configuration();
		let state = self.classify(configuration.as_ref());

		ConfigFileInfo {
			name: file_display_name(path),
			path: path.to_path_buf(),
			configuration,
			state,
		}
	}

	/// List every file in the config directory with its parsed config and state.
	///
	/// Files are listed in lexicographic order of their file names.
	/// Subdirectories are skipped. A file that can't be read or parsed shows up
	/// as [`ConfigState::Broken`] and never stops the listing.
	pub fn list_available_configs(&self) -> Result<Vec<ConfigFileInfo>> {
		let entries =
			std::fs::read_dir(&self.config_dir).map_err(|source| HsvError::ConfigDirError {
				path: self.config_dir.clone(),
				source,
			})?;

		let mut paths = Vec::new();
		for entry in entries {
			match entry {
				Ok(entry) => {
					let path = entry.path();
					if path.is_file() {
						paths.push(path);
					}
				}
				Err(e) => {
					warn!(path = %self.config_dir.display(), error = %e, "Skipping unreadable directory entry");
				}
			}
		}
		paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

		let infos: Vec<ConfigFileInfo> = paths.iter().map(|p| self.load_file_info(p)).collect();
		debug!(count = infos.len(), "Listed available configs");
		Ok(infos)
	}

	/// Make a config the active one.
	///
	/// Does nothing and returns `false` unless the config is selectable.
	/// Configs that need migrating are migrated first. The file's path is
	/// remembered for the next startup before the config becomes active, so a
	/// failed save leaves both the active config and the remembered path as
	/// they were.
	pub fn select_config(&mut self, config_file_info: ConfigFileInfo) -> Result<bool> {
		if !config_file_info.is_selectable() {
			debug!(
				path = %config_file_info.path.display(),
				state = %config_file_info.state,
				"Ignoring selection of unselectable config"
			);
			return Ok(false);
		}

		let ConfigFileInfo {
			path,
			configuration,
			state,
			..
		} = config_file_info;
		let Some(configuration) = configuration else {
			return Ok(false);
		};

		let configuration = self.prepare(configuration, state);
		self.settings.set_config_file_path(Some(path.clone()))?;
		self.current.set(configuration);

		info!(path = %path.display(), "Selected config");
		Ok(true)
	}

	/// Restore the remembered selection.
	///
	/// Leaves no active config when nothing is remembered, when the remembered
	/// file is unusable, or when it has disappeared (which also forgets it).
	/// None of these abort startup.
	pub fn initialize(&mut self) {
		let Some(path) = self.settings.config_file_path() else {
			debug!("No remembered config");
			return;
		};

		let configuration = match load_config(&path) {
			LoadOutcome::Loaded(configuration) => configuration,
			LoadOutcome::NotFound => {
				info!(path = %path.display(), "Remembered config no longer exists");
				self.current.clear();
				if let Err(e) = self.settings.set_config_file_path(None) {
					warn!(path = %path.display(), error = %e, "Failed to forget remembered config");
				}
				return;
			}
			LoadOutcome::Unreadable(e) => {
				warn!(path = %path.display(), error = %e, "Failed to load remembered config");
				self.current.clear();
				return;
			}
		};

		let state = self.classify(Some(&configuration));
		if !state.is_selectable() {
			warn!(path = %path.display(), state = %state, "Remembered config is not selectable");
			self.current.clear();
			return;
		}

		self.current.set(self.prepare(configuration, state));
		info!(path = %path.display(), "Restored config");
	}

	/// Bring a selectable config up to the plugin version.
	fn prepare(&self, mut configuration: Configuration, state: ConfigState) -> Configuration {
		if state == ConfigState::NeedsMigration {
			self.migrations
				.run_migration(&mut configuration, self.plugin_version);
		}
		configuration
	}

	/// The config `upgrade_file` would write for this file, without writing it.
	///
	/// Files marked as default configs become the built-in default instead of
	/// being migrated. `None` when the file doesn't need migrating.
	pub fn upgraded_configuration(&self, config_file_info: &ConfigFileInfo) -> Option<Configuration> {
		if config_file_info.state != ConfigState::NeedsMigration {
			return None;
		}
		let configuration = config_file_info.configuration.as_ref()?;

		if configuration.is_default_config {
			Some(Configuration::default_config(self.plugin_version))
		} else {
			Some(self.prepare(configuration.clone(), config_file_info.state))
		}
	}

	/// Rewrite an outdated config file in the current schema.
	///
	/// Writes what [`upgraded_configuration`](Self::upgraded_configuration)
	/// returns. Returns the written config, or `None` when the file doesn't
	/// need migrating.
	pub fn upgrade_file(&self, config_file_info: &ConfigFileInfo) -> Result<Option<Configuration>> {
		let Some(upgraded) = self.upgraded_configuration(config_file_info) else {
			return Ok(None);
		};

		write_config_file(&config_file_info.path, &upgraded)?;
		info!(path = %config_file_info.path.display(), version = %upgraded.version, "Upgraded config file");
		Ok(Some(upgraded))
	}

	/// Resolve a config by path, file name, or file name without extension.
	///
	/// Existing paths are returned as-is. Otherwise the name is looked up in
	/// the config directory, trying `<name>` and then `<name>.json`.
	pub fn resolve_config_path(&self, name: &str) -> Option<PathBuf> {
		let path = Path::new(name);
		if path.is_file() {
			return Some(path.to_path_buf());
		}

		[name.to_string(), format!("{name}.json")]
			.into_iter()
			.map(|candidate| self.config_dir.join(candidate))
			.find(|candidate| candidate.is_file())
	}
}

fn file_display_name(path: &Path) -> String {
	path.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.unwrap_or_default()
}
