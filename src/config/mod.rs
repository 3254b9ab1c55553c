//! Judgment config files.
//!
//! This module handles:
//! - The on-disk JSON schema
//! - Parsing and writing config files
//! - Structural validation
//! - Classifying a file against the running plugin version

pub mod parser;
pub mod state;
pub mod types;
pub mod validate;

pub use parser::{LoadOutcome, load_config, parse_config_file, parse_config_str, write_config_file};
pub use state::{ConfigState, classify, is_selectable};
pub use types::{
	ConfigFileInfo, Configuration, DisplayMode, Judgment, JudgmentSegment, segment_for,
};
pub use validate::validate;
