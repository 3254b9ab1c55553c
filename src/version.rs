use crate::error::{HsvError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Schema version the engine currently writes and migrates towards.
pub const PLUGIN_VERSION: Version = Version::new(2, 3, 0);

/// A `major.minor.patch` version.
///
/// Ordering is lexicographic on (major, minor, patch), which is what the
/// derived `Ord` gives us given the field order below. Equality and hashing
/// agree with that ordering, so versions can key maps and sorted sets.
///
/// On disk the three parts live as separate top-level fields of a config
/// file, so the serde names match those keys and the type is flattened into
/// [`Configuration`](crate::config::Configuration). Parts are signed: a file
/// claiming a negative part still parses and simply sorts below every release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
	#[serde(rename = "majorVersion")]
	pub major: i32,

	#[serde(rename = "minorVersion")]
	pub minor: i32,

	#[serde(rename = "patchVersion")]
	pub patch: i32,
}

impl Version {
	pub const fn new(major: i32, minor: i32, patch: i32) -> Self {
		Self {
			major,
			minor,
			patch,
		}
	}
}

impl fmt::Display for Version {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
	}
}

impl FromStr for Version {
	type Err = HsvError;

	fn from_str(s: &str) -> Result<Self> {
		let invalid = || HsvError::InvalidVersion {
			input: s.to_string(),
		};

		let parts: Vec<&str> = s.trim().split('.').collect();
		if parts.len() != 3 {
			return Err(invalid());
		}

		let mut numbers = [0i32; 3];
		for (slot, part) in numbers.iter_mut().zip(&parts) {
			*slot = part
				.parse()
				.ok()
				.filter(|n: &i32| *n >= 0)
				.ok_or_else(invalid)?;
		}

		Ok(Version::new(numbers[0], numbers[1], numbers[2]))
	}
}
