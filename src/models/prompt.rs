use serde::{Deserialize, Serialize};

/// One generated prompting strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptCandidate {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub strategy_type: Option<StrategyType>,
    pub icon: String,
    pub name: String,
    pub description: String,
    pub best_for: String,
    pub prompt: String,
}

/// Strategy tag. Tags this build does not know are kept verbatim so a
/// candidate can be handed back to the service unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    Cot,
    FewShot,
    Meta,
    SelfRefine,
    Structured,
    #[serde(untagged)]
    Other(String),
}

/// Ordered candidates; the order is the service's ranking and is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptSet {
    pub prompts: Vec<PromptCandidate>,
}

/// Body of a successful `POST /api/generate-prompts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePromptsResponse {
    pub prompts: PromptSet,
    #[serde(default)]
    pub selection_message: Option<String>,
}

/// Catalogue entry from `GET /api/strategies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    #[serde(rename = "type")]
    pub strategy_type: StrategyType,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub best_for: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyCatalog {
    pub strategies: Vec<StrategySummary>,
}

impl PromptSet {
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.prompts.is_empty() {
            return Err("no prompt strategies were returned".to_string());
        }
        if let Some(pos) = self.prompts.iter().position(|p| p.prompt.trim().is_empty()) {
            return Err(format!("prompt strategy #{} has empty prompt text", pos + 1));
        }
        Ok(())
    }
}
