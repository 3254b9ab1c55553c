use crate::config::types::Configuration;
use crate::config::validate::validate;
use crate::migration::MigrationRegistry;
use crate::version::Version;
use std::fmt;

/// How a parsed config file relates to the running plugin version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigState {
	/// The file could not be read or parsed.
	Broken,
	/// Written by a newer plugin release.
	NewerVersion,
	/// Older than the oldest version we can migrate from.
	Incompatible,
	/// Parsed, but failed validation.
	ValidationFailed,
	/// Usable after running migrations.
	NeedsMigration,
	/// Usable as-is.
	Compatible,
}

impl ConfigState {
	/// Only compatible configs and configs we can migrate may be selected.
	pub fn is_selectable(self) -> bool {
		matches!(self, ConfigState::Compatible | ConfigState::NeedsMigration)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			ConfigState::Broken => "broken",
			ConfigState::NewerVersion => "newer-version",
			ConfigState::Incompatible => "incompatible",
			ConfigState::ValidationFailed => "validation-failed",
			ConfigState::NeedsMigration => "needs-migration",
			ConfigState::Compatible => "compatible",
		}
	}
}

impl fmt::Display for ConfigState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.pad(self.as_str())
	}
}

/// Whether a possibly-unknown state may be selected.
pub fn is_selectable(state: Option<ConfigState>) -> bool {
	state.is_some_and(ConfigState::is_selectable)
}

/// Classify a parsed (or absent) configuration.
///
/// Rules apply in order, the first hit wins:
/// absent → `Broken`, newer than the plugin → `NewerVersion`, older than the
/// oldest migration → `Incompatible`, invalid → `ValidationFailed`, at or
/// below the newest migration → `NeedsMigration`, otherwise `Compatible`.
pub fn classify(
	configuration: Option<&Configuration>,
	plugin_version: Version,
	migrations: &MigrationRegistry,
) -> ConfigState {
	let Some(configuration) = configuration else {
		return ConfigState::Broken;
	};

	if configuration.version > plugin_version {
		return ConfigState::NewerVersion;
	}

	if migrations
		.minimum_migratable_version()
		.is_some_and(|minimum| configuration.version < minimum)
	{
		return ConfigState::Incompatible;
	}

	if !validate(configuration) {
		return ConfigState::ValidationFailed;
	}

	match migrations.maximum_migration_needed_version() {
		Some(maximum) if configuration.version <= maximum => ConfigState::NeedsMigration,
		_ => ConfigState::Compatible,
	}
}
