use crate::config::types::{Configuration, JudgmentSegment};

/// 2.0.0 introduced the per-part segment lists; older files have none.
pub fn migrate_2_0_0(configuration: &mut Configuration) -> bool {
	configuration.before_cut_angle_judgments = Some(vec![JudgmentSegment::default()]);
	configuration.accuracy_judgments = Some(vec![JudgmentSegment::default()]);
	configuration.after_cut_angle_judgments = Some(vec![JudgmentSegment::default()]);

	true
}

/// 2.1.0 moved the top judgment from 110 to 115 and the top accuracy
/// segment from 10 to 15.
pub fn migrate_2_1_0(configuration: &mut Configuration) -> bool {
	if let Some(judgments) = configuration.judgments.as_mut() {
		for judgment in judgments.iter_mut().filter(|j| j.threshold == 110) {
			judgment.threshold = 115;
		}
	}

	if let Some(segments) = configuration.accuracy_judgments.as_mut() {
		for segment in segments.iter_mut().filter(|s| s.threshold == 10) {
			segment.threshold = 15;
		}
	}

	true
}

/// 2.2.3 turned intermediate updates on by default.
pub fn migrate_2_2_3(configuration: &mut Configuration) -> bool {
	configuration.do_intermediate_updates = true;

	true
}
