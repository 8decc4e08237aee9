use serde::Serialize;

use tutor_core::model::AgentStatus;

use crate::vm::badge::Tone;

#[must_use]
pub fn agent_display_name(key: &str) -> String {
    match key {
        "teaching" => "Teaching Agent".to_string(),
        "assessment" => "Assessment Agent".to_string(),
        "knowledge" => "Knowledge Tracker".to_string(),
        "tutor" => "Personal Tutor".to_string(),
        "recommendation" => "Path Advisor".to_string(),
        other => other.to_string(),
    }
}

/// Label and tone for a reported agent state; unknown states show no label.
#[must_use]
pub fn agent_state_label(state: &str) -> Option<(&'static str, Tone)> {
    match state {
        "completed" => Some(("Ready", Tone::Green)),
        "idle" => Some(("Idle", Tone::Slate)),
        "acting" => Some(("Working", Tone::Blue)),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AgentRowVm {
    pub key: String,
    pub name: String,
    pub state: Option<&'static str>,
    pub tone: Tone,
    pub memories: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AgentPanelVm {
    pub active_agents: usize,
    pub tasks_coordinated: u64,
    pub total_memory: u64,
    pub agents: Vec<AgentRowVm>,
}

impl From<&AgentStatus> for AgentPanelVm {
    fn from(status: &AgentStatus) -> Self {
        let agents = status
            .sub_agents
            .iter()
            .map(|(key, stats)| {
                let label = stats.state.as_deref().and_then(agent_state_label);
                AgentRowVm {
                    key: key.clone(),
                    name: agent_display_name(key),
                    state: label.map(|(text, _)| text),
                    tone: label.map_or(Tone::Slate, |(_, tone)| tone),
                    memories: stats.memory_size,
                }
            })
            .collect();
        Self {
            active_agents: status.active_agents(),
            tasks_coordinated: status.tasks_coordinated(),
            total_memory: status.total_memory,
            agents,
        }
    }
}
