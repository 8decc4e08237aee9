use serde::Serialize;

use tutor_core::model::MergedTopicProgress;

use crate::vm::badge::MasteryBand;
use crate::vm::content_vm::{level_percent, truncate_text};

/// Axis labels longer than this are shortened.
pub const CHART_LABEL_LEN: usize = 15;

/// One bar of the knowledge chart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChartRowVm {
    pub label: String,
    pub full_name: String,
    pub knowledge: u32,
    pub confidence: u32,
    pub practices: u32,
    pub band: MasteryBand,
    pub color: &'static str,
}

/// Bars for every topic with some knowledge, strongest first.
#[must_use]
pub fn map_chart_rows(progress: &[MergedTopicProgress]) -> Vec<ChartRowVm> {
    let mut rows: Vec<ChartRowVm> = progress
        .iter()
        .filter(|topic| topic.knowledge_level() > 0.0)
        .map(|topic| {
            let knowledge = level_percent(topic.knowledge_level());
            let band = MasteryBand::from_percent(knowledge);
            ChartRowVm {
                label: truncate_text(topic.name(), CHART_LABEL_LEN),
                full_name: topic.name().to_string(),
                knowledge,
                confidence: level_percent(topic.confidence()),
                practices: topic.practice_count(),
                band,
                color: band.hex(),
            }
        })
        .collect();
    rows.sort_by(|a, b| b.knowledge.cmp(&a.knowledge));
    rows
}
