use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Input,
    AnalysisReview,
    StrategySelection,
    FinalPrompt,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::Input,
        Step::AnalysisReview,
        Step::StrategySelection,
        Step::FinalPrompt,
    ];

    /// 1-based position in the wizard.
    pub fn number(self) -> u8 {
        match self {
            Step::Input => 1,
            Step::AnalysisReview => 2,
            Step::StrategySelection => 3,
            Step::FinalPrompt => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Input => "입력",
            Step::AnalysisReview => "분석 확인",
            Step::StrategySelection => "전략 선택",
            Step::FinalPrompt => "최종 프롬프트",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}

/// Progress marker shown for each step at the top of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepIndicator {
    pub step: Step,
    pub active: bool,
    pub completed: bool,
}

impl StepIndicator {
    pub fn initial() -> [StepIndicator; 4] {
        Step::ALL.map(|step| StepIndicator {
            step,
            active: step == Step::Input,
            completed: false,
        })
    }
}
