use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Statistics one backend agent reports about itself.
///
/// Agents report different counters; the ones the client shows are typed and
/// everything else is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentStats {
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub memory_size: u64,
    #[serde(default)]
    pub tasks_coordinated: Option<u64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Optional backend introspection of its multi-agent system.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentStatus {
    #[serde(default)]
    pub coordinator: Option<AgentStats>,
    #[serde(default)]
    pub sub_agents: BTreeMap<String, AgentStats>,
    #[serde(default)]
    pub total_memory: u64,
}

impl AgentStatus {
    #[must_use]
    pub fn active_agents(&self) -> usize {
        self.sub_agents.len()
    }

    #[must_use]
    pub fn tasks_coordinated(&self) -> u64 {
        self.coordinator
            .as_ref()
            .and_then(|c| c.tasks_coordinated)
            .unwrap_or(0)
    }
}
