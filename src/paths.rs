use crate::error::{HsvError, Result};
use std::path::PathBuf;

/// Directory name shared by the config directory and the settings file.
pub const APP_DIR: &str = "HitScoreVisualizer";

/// Settings file name inside the app's config directory.
pub const SETTINGS_FILENAME: &str = "settings.toml";

/// Get the directory user config files are read from.
pub fn default_config_dir() -> Result<PathBuf> {
	let data_dir = dirs::data_dir().ok_or(HsvError::DataDirectoryNotFound)?;
	Ok(data_dir.join(APP_DIR))
}

/// Get the path of the file that remembers the selected config.
pub fn default_settings_path() -> Result<PathBuf> {
	let config_dir = dirs::config_dir().ok_or(HsvError::DataDirectoryNotFound)?;
	Ok(config_dir.join(APP_DIR).join(SETTINGS_FILENAME))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_paths() {
		if let Ok(dir) = default_config_dir() {
			assert!(dir.ends_with(APP_DIR));
		}
		if let Ok(path) = default_settings_path() {
			assert!(path.ends_with("HitScoreVisualizer/settings.toml"));
		}
	}
}
