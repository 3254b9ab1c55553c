use crate::config::types::Configuration;
use crate::migration::steps;
use crate::version::Version;
use tracing::{debug, info};

/// Signature of a single migration step. The return value is informational.
pub type MigrationFn = fn(&mut Configuration) -> bool;

/// A migration to a specific schema version.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
	/// Schema version this step upgrades configs to.
	pub version: Version,

	/// Short human-readable description, for logs.
	pub description: &'static str,

	pub apply: MigrationFn,
}

/// Migrations sorted ascending by target version.
#[derive(Debug, Clone)]
pub struct MigrationRegistry {
	migrations: Vec<Migration>,
}

impl MigrationRegistry {
	/// Build a registry, sorting the migrations by version.
	pub fn new(mut migrations: Vec<Migration>) -> Self {
		migrations.sort_by_key(|m| m.version);
		Self { migrations }
	}

	/// The migrations shipped with this release.
	pub fn builtin() -> Self {
		Self::new(vec![
			Migration {
				version: Version::new(2, 0, 0),
				description: "add default angle and accuracy segments",
				apply: steps::migrate_2_0_0,
			},
			Migration {
				version: Version::new(2, 1, 0),
				description: "rebalance 110 and 10 thresholds",
				apply: steps::migrate_2_1_0,
			},
			Migration {
				version: Version::new(2, 2, 3),
				description: "enable intermediate updates",
				apply: steps::migrate_2_2_3,
			},
		])
	}

	pub fn migrations(&self) -> &[Migration] {
		&self.migrations
	}

	/// Configs older than this are incompatible.
	pub fn minimum_migratable_version(&self) -> Option<Version> {
		self.migrations.first().map(|m| m.version)
	}

	/// Configs at or below this version need migrating.
	pub fn maximum_migration_needed_version(&self) -> Option<Version> {
		self.migrations.last().map(|m| m.version)
	}

	/// Migrations that apply to a config at `from`, in order.
	///
	/// The bound is inclusive: a config exactly at a migration's version gets
	/// that migration again.
	pub fn pending(&self, from: Version) -> impl Iterator<Item = &Migration> {
		self.migrations.iter().filter(move |m| m.version >= from)
	}

	/// Apply every pending migration in ascending order, then stamp the
	/// config with `target`.
	pub fn run_migration(&self, configuration: &mut Configuration, target: Version) {
		let from = configuration.version;

		for migration in self.pending(from) {
			debug!(
				version = %migration.version,
				description = migration.description,
				"Applying config migration"
			);
			(migration.apply)(configuration);
		}

		configuration.version = target;
		info!(from = %from, to = %target, "Migrated config");
	}
}

impl Default for MigrationRegistry {
	fn default() -> Self {
		Self::builtin()
	}
}
