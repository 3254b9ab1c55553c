use crate::version::Version;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::path::PathBuf;

/// How a judgment popup combines the judgment text and the numeric score.
///
/// Derived from the free-form `displayMode` string of a config file. The raw
/// string is what gets stored and written back, so unknown values survive a
/// load/save cycle untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
	/// Judgment text with format specifiers (`%b`, `%c`, `%a`, `%B`, `%C`, `%A`, `%s`, `%p`, `%%`, `%n`).
	Format,
	/// Only the note score.
	Numeric,
	/// Only the judgment text.
	TextOnly,
	/// Numeric score above the judgment text.
	ScoreOnTop,
	/// Judgment text above the numeric score.
	Stacked,
}

impl DisplayMode {
	pub fn from_raw(raw: &str) -> Self {
		match raw {
			"" | "format" => DisplayMode::Format,
			"numeric" => DisplayMode::Numeric,
			"textOnly" => DisplayMode::TextOnly,
			"scoreOnTop" => DisplayMode::ScoreOnTop,
			_ => DisplayMode::Stacked,
		}
	}
}

/// A scoring tier for the total score of a cut.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Judgment {
	/// Inclusive lower bound on the total score.
	#[serde(default, deserialize_with = "integral_threshold")]
	pub threshold: i32,

	/// Display text, may contain format specifiers.
	#[serde(default, deserialize_with = "null_as_default")]
	pub text: String,

	/// RGBA, each component in 0..=1. Must hold exactly four numbers.
	#[serde(default)]
	pub color: Vec<f32>,

	/// Fade the color towards the next-higher judgment.
	#[serde(default, skip_serializing_if = "is_false")]
	pub fade: bool,
}

/// A scoring tier for one part of a cut (before-cut angle, accuracy, after-cut angle).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgmentSegment {
	#[serde(default, deserialize_with = "integral_threshold")]
	pub threshold: i32,

	#[serde(default, deserialize_with = "null_as_default")]
	pub text: String,
}

/// A judgment config as stored in a user's config file.
///
/// The version fields are required: a file without them never parses and is
/// therefore classified as broken. Every other field falls back to its
/// default when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
	/// Schema version the file claims. Always written.
	#[serde(flatten)]
	pub version: Version,

	/// If true, a plugin update overwrites this file with the built-in
	/// default instead of migrating it.
	#[serde(default, skip_serializing_if = "is_false")]
	pub is_default_config: bool,

	/// Raw display mode, see [`DisplayMode`].
	#[serde(
		default,
		deserialize_with = "null_as_default",
		skip_serializing_if = "String::is_empty"
	)]
	pub display_mode: String,

	/// Keep judgments at the fixed position instead of moving them with the note.
	#[serde(rename = "useFixedPos", default, skip_serializing_if = "is_false")]
	pub use_fixed_pos: bool,

	#[serde(rename = "fixedPosX", default, skip_serializing_if = "is_zero")]
	pub fixed_pos_x: f32,

	#[serde(rename = "fixedPosY", default, skip_serializing_if = "is_zero")]
	pub fixed_pos_y: f32,

	#[serde(rename = "fixedPosZ", default, skip_serializing_if = "is_zero")]
	pub fixed_pos_z: f32,

	/// Update popups while the score of a cut is still being finalized.
	#[serde(default, skip_serializing_if = "is_false")]
	pub do_intermediate_updates: bool,

	/// Ordered from highest threshold to lowest; the first match applies.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub judgments: Option<Vec<Judgment>>,

	/// Before-cut swing segments (score 0-70), format specifier `%B`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub before_cut_angle_judgments: Option<Vec<JudgmentSegment>>,

	/// Cut accuracy segments (score 0-15), format specifier `%C`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub accuracy_judgments: Option<Vec<JudgmentSegment>>,

	/// After-cut swing segments (score 0-30), format specifier `%A`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub after_cut_angle_judgments: Option<Vec<JudgmentSegment>>,
}

fn is_false(value: &bool) -> bool {
	!*value
}

fn is_zero(value: &f32) -> bool {
	*value == 0.0
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept whole-number floats (`110.0`) as thresholds.
fn integral_threshold<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
	D: Deserializer<'de>,
{
	let value = f64::deserialize(deserializer)?;
	if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
		return Err(de::Error::custom(format!(
			"threshold {value} is not a whole number"
		)));
	}
	Ok(value as i32)
}

impl Configuration {
	/// The built-in config, stamped with `version`.
	pub fn default_config(version: Version) -> Self {
		let judgment = |threshold: i32, text: &str, color: [f32; 4], fade: bool| Judgment {
			threshold,
			text: text.to_string(),
			color: color.to_vec(),
			fade,
		};
		let segments = |threshold: i32, text: &str| {
			Some(vec![
				JudgmentSegment {
					threshold,
					text: text.to_string(),
				},
				JudgmentSegment {
					threshold: 0,
					text: " ".to_string(),
				},
			])
		};

		Configuration {
			version,
			is_default_config: true,
			display_mode: String::new(),
			use_fixed_pos: false,
			fixed_pos_x: 0.0,
			fixed_pos_y: 0.0,
			fixed_pos_z: 0.0,
			do_intermediate_updates: true,
			judgments: Some(vec![
				judgment(115, "%BFantastic%A%n%s", [1.0, 1.0, 1.0, 1.0], false),
				judgment(101, "<size = 80%>%BExcellent%A</size>%n%s", [0.0, 1.0, 0.0, 1.0], false),
				judgment(90, "<size = 80%>%BGreat%A</size>%n%s", [1.0, 0.980392158, 0.0, 1.0], false),
				judgment(80, "<size = 80%>%BGood%A</size>%n%s", [1.0, 0.6, 0.0, 1.0], true),
				judgment(60, "<size = 80%>%BDecent%A</size>%n%s", [1.0, 0.0, 0.0, 1.0], true),
				judgment(0, "<size = 80%>%BWay Off%A</size>%n%s", [0.5, 0.0, 0.0, 1.0], true),
			]),
			before_cut_angle_judgments: segments(70, "+"),
			accuracy_judgments: segments(15, " + "),
			after_cut_angle_judgments: segments(30, " + "),
		}
	}

	pub fn display_mode(&self) -> DisplayMode {
		DisplayMode::from_raw(&self.display_mode)
	}

	/// The fixed popup position, only when fixed positioning is enabled.
	pub fn fixed_position(&self) -> Option<[f32; 3]> {
		self.use_fixed_pos
			.then_some([self.fixed_pos_x, self.fixed_pos_y, self.fixed_pos_z])
	}

	/// Find the judgment for a total score.
	///
	/// Returns the first judgment in file order whose threshold the score
	/// meets, or the last judgment when none does.
	pub fn judgment_for(&self, score: i32) -> Option<&Judgment> {
		let judgments = self.judgments.as_deref()?;
		judgments
			.iter()
			.find(|j| score >= j.threshold)
			.or_else(|| judgments.last())
	}
}

/// Find the segment for a partial score, with the same rules as
/// [`Configuration::judgment_for`].
pub fn segment_for(segments: &[JudgmentSegment], score: i32) -> Option<&JudgmentSegment> {
	segments
		.iter()
		.find(|s| score >= s.threshold)
		.or_else(|| segments.last())
}

/// A candidate config file found in the config directory.
#[derive(Debug, Clone)]
pub struct ConfigFileInfo {
	/// File name without extension, for display.
	pub name: String,

	/// Full path of the file.
	pub path: PathBuf,

	/// The parsed config, absent when the file could not be read or parsed.
	pub configuration: Option<Configuration>,

	/// Classification of `configuration` against the plugin version.
	pub state: super::ConfigState,
}

impl ConfigFileInfo {
	pub fn is_selectable(&self) -> bool {
		self.state.is_selectable()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn judgment(threshold: i32) -> Judgment {
		Judgment {
			threshold,
			text: format!("t{threshold}"),
			color: vec![1.0, 1.0, 1.0, 1.0],
			fade: false,
		}
	}

	#[test]
	fn test_display_mode_from_raw() {
		assert_eq!(DisplayMode::from_raw(""), DisplayMode::Format);
		assert_eq!(DisplayMode::from_raw("format"), DisplayMode::Format);
		assert_eq!(DisplayMode::from_raw("numeric"), DisplayMode::Numeric);
		assert_eq!(DisplayMode::from_raw("textOnly"), DisplayMode::TextOnly);
		assert_eq!(DisplayMode::from_raw("scoreOnTop"), DisplayMode::ScoreOnTop);
		assert_eq!(DisplayMode::from_raw("whatever"), DisplayMode::Stacked);
		// Matching is case sensitive
		assert_eq!(DisplayMode::from_raw("Numeric"), DisplayMode::Stacked);
	}

	#[test]
	fn test_default_config() {
		let version = Version::new(2, 3, 0);
		let config = Configuration::default_config(version);

		assert_eq!(config.version, version);
		assert!(config.is_default_config);
		assert!(config.do_intermediate_updates);
		assert_eq!(config.display_mode(), DisplayMode::Format);
		assert!(config.fixed_position().is_none());

		let thresholds: Vec<i32> = config
			.judgments
			.as_ref()
			.unwrap()
			.iter()
			.map(|j| j.threshold)
			.collect();
		assert_eq!(thresholds, vec![115, 101, 90, 80, 60, 0]);
		assert_eq!(config.accuracy_judgments.as_ref().unwrap()[0].threshold, 15);
	}

	#[test]
	fn test_fixed_position_only_when_enabled() {
		let mut config = Configuration::default_config(Version::new(2, 3, 0));
		config.fixed_pos_x = 1.0;
		config.fixed_pos_y = 2.0;
		config.fixed_pos_z = 3.0;
		assert!(config.fixed_position().is_none());

		config.use_fixed_pos = true;
		assert_eq!(config.fixed_position(), Some([1.0, 2.0, 3.0]));
	}

	#[test]
	fn test_judgment_for_uses_file_order() {
		let mut config = Configuration::default_config(Version::new(2, 3, 0));
		config.judgments = Some(vec![judgment(100), judgment(50), judgment(10)]);

		assert_eq!(config.judgment_for(115).unwrap().threshold, 100);
		assert_eq!(config.judgment_for(100).unwrap().threshold, 100);
		assert_eq!(config.judgment_for(99).unwrap().threshold, 50);
		assert_eq!(config.judgment_for(10).unwrap().threshold, 10);
		// Below every threshold falls back to the last entry
		assert_eq!(config.judgment_for(3).unwrap().threshold, 10);

		// Unsorted input is trusted as-is
		config.judgments = Some(vec![judgment(10), judgment(100)]);
		assert_eq!(config.judgment_for(115).unwrap().threshold, 10);
	}

	#[test]
	fn test_judgment_for_without_judgments() {
		let mut config = Configuration::default_config(Version::new(2, 3, 0));
		config.judgments = None;
		assert!(config.judgment_for(50).is_none());

		config.judgments = Some(Vec::new());
		assert!(config.judgment_for(50).is_none());
	}

	#[test]
	fn test_null_strings_read_as_empty() {
		let config: Configuration = serde_json::from_str(
			r#"{"majorVersion": 2, "minorVersion": 3, "patchVersion": 0,
			    "displayMode": null,
			    "judgments": [{"threshold": 0, "text": null, "color": [1, 1, 1, 1]}],
			    "accuracyJudgments": [{"threshold": 15, "text": null}]}"#,
		)
		.unwrap();

		assert_eq!(config.display_mode, "");
		assert_eq!(config.display_mode(), DisplayMode::Format);
		assert_eq!(config.judgments.unwrap()[0].text, "");
		assert_eq!(config.accuracy_judgments.unwrap()[0].text, "");
	}

	#[test]
	fn test_whole_number_float_thresholds() {
		let parsed: Judgment =
			serde_json::from_str(r#"{"threshold": 110.0, "text": "x", "color": []}"#).unwrap();
		assert_eq!(parsed.threshold, 110);

		let segment: JudgmentSegment =
			serde_json::from_str(r#"{"threshold": -5.0, "text": "x"}"#).unwrap();
		assert_eq!(segment.threshold, -5);

		assert!(serde_json::from_str::<Judgment>(r#"{"threshold": 110.5}"#).is_err());
		assert!(serde_json::from_str::<Judgment>(r#"{"threshold": 1e12}"#).is_err());
	}

	#[test]
	fn test_negative_version_parts_parse() {
		let config: Configuration = serde_json::from_str(
			r#"{"majorVersion": 2, "minorVersion": -1, "patchVersion": 0}"#,
		)
		.unwrap();
		assert_eq!(config.version, Version::new(2, -1, 0));
	}

	#[test]
	fn test_segment_for() {
		let segments = vec![
			JudgmentSegment {
				threshold: 15,
				text: "+".to_string(),
			},
			JudgmentSegment {
				threshold: 0,
				text: " ".to_string(),
			},
		];

		assert_eq!(segment_for(&segments, 15).unwrap().text, "+");
		assert_eq!(segment_for(&segments, 14).unwrap().text, " ");
		assert!(segment_for(&[], 14).is_none());
	}
}
