use serde::{self, Deserialize, Serialize};

use crate::agents::Agent;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Agent,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AgentList {
    pub data: Vec<AgentInfo>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AgentInfo {
    pub id: String,
    pub object: ObjectType,
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl From<&Agent> for AgentInfo {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.key.to_string(),
            object: ObjectType::Agent,
            role: agent.role.to_string(),
            goal: agent.goal.to_string(),
            backstory: agent.backstory.to_string(),
        }
    }
}
