use crate::config::types::Configuration;
use arc_swap::ArcSwapOption;
use std::sync::Arc;

/// The active configuration, shared with everything that renders judgments.
///
/// Cloning gives another handle to the same slot. Readers always see a whole
/// configuration: a selection swaps the `Arc` atomically and never edits the
/// published value in place.
#[derive(Debug, Clone, Default)]
pub struct CurrentConfig {
	slot: Arc<ArcSwapOption<Configuration>>,
}

impl CurrentConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// The active configuration, if one has been selected.
	pub fn get(&self) -> Option<Arc<Configuration>> {
		self.slot.load_full()
	}

	pub(crate) fn set(&self, configuration: Configuration) -> Arc<Configuration> {
		let configuration = Arc::new(configuration);
		self.slot.store(Some(Arc::clone(&configuration)));
		configuration
	}

	pub(crate) fn clear(&self) {
		self.slot.store(None);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::version::Version;

	#[test]
	fn test_handles_share_slot() {
		let current = CurrentConfig::new();
		let reader = current.clone();
		assert!(reader.get().is_none());

		current.set(Configuration::default_config(Version::new(2, 3, 0)));
		assert!(reader.get().is_some());
		assert_eq!(reader.get().unwrap().version, Version::new(2, 3, 0));

		current.clear();
		assert!(reader.get().is_none());
	}

	#[test]
	fn test_replacement_leaves_old_snapshot_intact() {
		let current = CurrentConfig::new();
		current.set(Configuration::default_config(Version::new(2, 0, 0)));
		let snapshot = current.get().unwrap();

		current.set(Configuration::default_config(Version::new(2, 3, 0)));

		assert_eq!(snapshot.version, Version::new(2, 0, 0));
		assert_eq!(current.get().unwrap().version, Version::new(2, 3, 0));
	}
}
