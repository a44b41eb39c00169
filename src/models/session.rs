use super::{AnalysisResult, PromptCandidate, PromptSet};

/// Cross-step results for one workflow run. Created with the controller,
/// reset as a whole on restart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    analysis: Option<AnalysisResult>,
    prompts: Option<PromptSet>,
    selected: Option<PromptCandidate>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn prompts(&self) -> Option<&PromptSet> {
        self.prompts.as_ref()
    }

    pub fn selected(&self) -> Option<&PromptCandidate> {
        self.selected.as_ref()
    }

    pub fn set_analysis(&mut self, analysis: AnalysisResult) {
        self.analysis = Some(analysis);
    }

    pub fn set_prompts(&mut self, prompts: PromptSet) {
        self.prompts = Some(prompts);
    }

    pub fn set_selected(&mut self, candidate: PromptCandidate) {
        self.selected = Some(candidate);
    }

    pub fn is_empty(&self) -> bool {
        self.analysis.is_none() && self.prompts.is_none() && self.selected.is_none()
    }

    pub fn clear(&mut self) {
        self.analysis = None;
        self.prompts = None;
        self.selected = None;
    }
}
