//! Structural checks on a parsed configuration.
//!
//! Only the judgments are checked. Segment lists, the display mode string,
//! and the fixed position are accepted as written so that existing user files
//! keep loading.

use crate::config::types::{Configuration, Judgment};
use tracing::warn;

/// Check that a configuration is usable.
///
/// Fails when there are no judgments, or when any judgment's color doesn't
/// hold exactly four numbers. Every offending judgment is logged.
pub fn validate(configuration: &Configuration) -> bool {
	let Some(judgments) = configuration.judgments.as_deref() else {
		return false;
	};

	if judgments.is_empty() {
		return false;
	}

	// No short-circuit, so that every bad judgment gets reported
	judgments
		.iter()
		.map(validate_judgment)
		.fold(true, |all_valid, valid| all_valid && valid)
}

fn validate_judgment(judgment: &Judgment) -> bool {
	if judgment.color.len() != 4 {
		warn!(
			text = %judgment.text,
			threshold = judgment.threshold,
			colors = judgment.color.len(),
			"Judgment \"{}\" with threshold {} has invalid color!",
			judgment.text,
			judgment.threshold
		);
		warn!("Make sure to include exactly 4 numbers for each judgment's color!");
		return false;
	}

	true
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::version::Version;
	use std::io;
	use std::sync::{Arc, Mutex};

	/// Collects formatted log output.
	#[derive(Clone, Default)]
	struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

	impl io::Write for CapturedLogs {
		fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
			self.0.lock().unwrap().extend_from_slice(buf);
			Ok(buf.len())
		}

		fn flush(&mut self) -> io::Result<()> {
			Ok(())
		}
	}

	impl CapturedLogs {
		fn contents(&self) -> String {
			String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
		}
	}

	fn validate_capturing_logs(config: &Configuration) -> (bool, String) {
		let logs = CapturedLogs::default();
		let writer = logs.clone();
		let subscriber = tracing_subscriber::fmt()
			.with_writer(move || writer.clone())
			.with_ansi(false)
			.without_time()
			.finish();

		let valid = tracing::subscriber::with_default(subscriber, || validate(config));
		(valid, logs.contents())
	}

	fn config_with(judgments: Option<Vec<Judgment>>) -> Configuration {
		let mut config = Configuration::default_config(Version::new(2, 3, 0));
		config.judgments = judgments;
		config
	}

	fn judgment(threshold: i32, color: Vec<f32>) -> Judgment {
		Judgment {
			threshold,
			text: "Judgment".to_string(),
			color,
			fade: false,
		}
	}

	#[test]
	fn test_default_config_is_valid() {
		assert!(validate(&Configuration::default_config(Version::new(2, 3, 0))));
	}

	#[test]
	fn test_absent_judgments_fail() {
		assert!(!validate(&config_with(None)));
	}

	#[test]
	fn test_empty_judgments_fail() {
		assert!(!validate(&config_with(Some(Vec::new()))));
	}

	#[test]
	fn test_four_component_colors_pass() {
		let config = config_with(Some(vec![
			judgment(100, vec![1.0, 1.0, 1.0, 1.0]),
			judgment(0, vec![0.0, 0.0, 0.0, 0.5]),
		]));
		assert!(validate(&config));
	}

	#[test]
	fn test_single_bad_color_fails_whole_config() {
		let config = config_with(Some(vec![
			judgment(100, vec![1.0, 1.0, 1.0, 1.0]),
			judgment(50, vec![1.0, 1.0, 1.0]),
			judgment(0, vec![0.0, 0.0, 0.0, 1.0]),
		]));
		assert!(!validate(&config));
	}

	#[test]
	fn test_bad_color_warns_with_text_and_threshold() {
		let mut bad = judgment(50, vec![1.0, 1.0, 1.0]);
		bad.text = "Almost".to_string();
		let config = config_with(Some(vec![judgment(100, vec![1.0; 4]), bad]));

		let (valid, logs) = validate_capturing_logs(&config);

		assert!(!valid);
		assert!(logs.contains("WARN"));
		assert!(logs.contains("Judgment \"Almost\" with threshold 50 has invalid color!"));
		assert!(logs.contains("Make sure to include exactly 4 numbers"));
		assert_eq!(logs.matches("has invalid color").count(), 1);
	}

	#[test]
	fn test_every_bad_color_is_reported() {
		let config = config_with(Some(vec![
			judgment(100, vec![1.0; 3]),
			judgment(0, vec![1.0; 5]),
		]));

		let (valid, logs) = validate_capturing_logs(&config);

		assert!(!valid);
		assert!(logs.contains("threshold 100"));
		assert!(logs.contains("threshold 0"));
	}

	#[test]
	fn test_valid_config_logs_nothing() {
		let (valid, logs) = validate_capturing_logs(&Configuration::default_config(Version::new(2, 3, 0)));
		assert!(valid);
		assert!(logs.is_empty());
	}

	#[test]
	fn test_too_many_color_components_fail() {
		let config = config_with(Some(vec![judgment(0, vec![1.0; 5])]));
		assert!(!validate(&config));
	}

	#[test]
	fn test_segments_and_display_mode_not_checked() {
		let mut config = config_with(Some(vec![judgment(0, vec![1.0; 4])]));
		config.display_mode = "sideways".to_string();
		config.before_cut_angle_judgments = None;
		config.accuracy_judgments = Some(Vec::new());
		config.use_fixed_pos = true;
		config.fixed_pos_x = f32::NAN;
		assert!(validate(&config));
	}
}
