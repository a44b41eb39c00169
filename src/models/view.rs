use serde::Serialize;

use super::{PromptCandidate, Step, StepIndicator, StrategySummary};

pub const COPY_LABEL: &str = "📋 복사하기";
pub const COPIED_LABEL: &str = "✅ 복사됨!";

/// Full description of what the wizard should show. The controller owns one
/// and publishes a snapshot after every change; renderers only read it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WizardView {
    pub current_step: Step,
    pub indicators: [StepIndicator; 4],
    pub input: InputView,
    pub analysis: Option<AnalysisView>,
    pub gallery: Option<GalleryView>,
    pub final_prompt: Option<FinalView>,
    pub loading: Option<String>,
    pub notification: Option<Notification>,
    pub copy_button: CopyButton,
    pub catalog: Option<Vec<StrategySummary>>,
    /// Bumped whenever the viewport should jump back to the top.
    pub scroll_epoch: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputView {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisView {
    pub query: String,
    pub fields: Vec<LabeledField>,
    pub confidence_text: String,
    pub keywords: Vec<String>,
    pub trends: Vec<TrendItem>,
    pub summary: String,
    pub confirmation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendItem {
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryView {
    pub selection_message: Option<String>,
    pub cards: Vec<PromptCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptCard {
    pub number: usize,
    pub icon: String,
    pub name: String,
    pub description: String,
    pub best_for: String,
    pub preview: Disclosure,
    /// Payload of the card's "select" action: the whole candidate.
    pub select: PromptCandidate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Disclosure {
    pub summary: &'static str,
    pub body: String,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalView {
    pub strategy_name: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// Distinguishes two consecutive notifications with the same text.
    pub id: u64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CopyButton {
    pub label: &'static str,
    pub confirmed: bool,
}

impl Default for CopyButton {
    fn default() -> Self {
        Self {
            label: COPY_LABEL,
            confirmed: false,
        }
    }
}

impl Default for WizardView {
    fn default() -> Self {
        Self {
            current_step: Step::Input,
            indicators: StepIndicator::initial(),
            input: InputView::default(),
            analysis: None,
            gallery: None,
            final_prompt: None,
            loading: None,
            notification: None,
            copy_button: CopyButton::default(),
            catalog: None,
            scroll_epoch: 0,
        }
    }
}

impl WizardView {
    pub fn indicator(&self, step: Step) -> &StepIndicator {
        &self.indicators[usize::from(step.number() - 1)]
    }

    pub fn completed_steps(&self) -> Vec<Step> {
        self.indicators
            .iter()
            .filter(|i| i.completed)
            .map(|i| i.step)
            .collect()
    }
}
