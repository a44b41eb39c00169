use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::WizardError;
use crate::models::{
    CopyButton, Notification, PromptCandidate, SessionState, Step, WizardView, COPIED_LABEL,
};
use crate::services::api_client::PromptService;
use crate::services::clipboard::ClipboardSink;
use crate::services::renderer::{render_analysis, render_final, render_gallery};

pub const EMPTY_QUERY: &str = "내용을 입력해주세요!";
pub const MISSING_ANALYSIS: &str = "분석 결과가 없습니다.";
pub const NOTHING_TO_COPY: &str = "복사할 프롬프트가 없습니다.";
pub const COPY_FAILED: &str = "복사에 실패했습니다.";

pub const ANALYZE_LOADING: &str = "🔍 AI가 분석하고 최신 트렌드를 수집하고 있습니다...";
pub const GENERATE_LOADING: &str = "🎨 5가지 프롬프팅 전략을 생성하고 있습니다...";
pub const STRATEGIES_LOADING: &str = "📚 전략 목록을 불러오고 있습니다...";

pub const DEFAULT_COPY_FEEDBACK: Duration = Duration::from_millis(2000);

/// The error for an action that is not offered on `step`.
pub fn wrong_step(action: &str, step: Step) -> WizardError {
    WizardError::Validation(format!(
        "'{}' 명령은 {} 단계에서 사용할 수 없습니다.",
        action, step
    ))
}

/// Drives the four-step wizard.
///
/// The controller is the only writer of the session state and of the view
/// model. Every change to the view is published as a snapshot on a watch
/// channel; a renderer subscribes with [`WizardController::subscribe`].
/// Operations take `&mut self`, so two of them can never interleave.
pub struct WizardController<S, C> {
    service: S,
    clipboard: C,
    session: SessionState,
    view: WizardView,
    publisher: watch::Sender<WizardView>,
    copy_feedback: Duration,
    copied_at: Option<Instant>,
    notifications: u64,
}

impl<S, C> WizardController<S, C>
where
    S: PromptService,
    C: ClipboardSink,
{
    pub fn new(service: S, clipboard: C) -> Self {
        Self::with_copy_feedback(service, clipboard, DEFAULT_COPY_FEEDBACK)
    }

    pub fn with_copy_feedback(service: S, clipboard: C, copy_feedback: Duration) -> Self {
        let view = WizardView::default();
        let (publisher, _) = watch::channel(view.clone());
        Self {
            service,
            clipboard,
            session: SessionState::new(),
            view,
            publisher,
            copy_feedback,
            copied_at: None,
            notifications: 0,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<WizardView> {
        self.publisher.subscribe()
    }

    pub fn view(&self) -> &WizardView {
        &self.view
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn current_step(&self) -> Step {
        self.view.current_step
    }

    /// Mirror of the input field.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.view.input.query = text.into();
        self.publish();
    }

    /// Move to `step`: swap the active view and indicator, mark every
    /// earlier step completed and jump back to the top.
    pub fn go_to_step(&mut self, step: Step) {
        let previous = self.view.current_step;
        self.view.indicators[index(previous)].active = false;

        self.view.current_step = step;
        self.view.indicators[index(step)].active = true;

        for indicator in self.view.indicators.iter_mut() {
            if indicator.step < step {
                indicator.completed = true;
            }
        }

        self.view.scroll_epoch += 1;
        log::debug!("Wizard step {} -> {}", previous.number(), step.number());
        self.publish();
    }

    /// Step 1: analyze the text in the input field.
    pub async fn analyze_query(&mut self) -> Result<(), WizardError> {
        self.require_step(Step::Input, "analyze")?;
        let query = self.view.input.query.trim().to_string();
        if query.is_empty() {
            return self.report(WizardError::Validation(EMPTY_QUERY.to_string()));
        }

        self.begin_loading(ANALYZE_LOADING);
        let outcome = self.service.analyze(&query).await;
        self.end_loading();

        match outcome {
            Ok(result) => {
                log::info!(
                    "Analysis done: intent={} confidence={:.2} trends={}",
                    result.intent.primary_intent,
                    result.intent.confidence,
                    result.trends.trends.len()
                );
                self.view.analysis = Some(render_analysis(&result));
                self.session.set_analysis(result);
                self.go_to_step(Step::AnalysisReview);
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    /// Step 2: turn the stored analysis into prompt strategies.
    pub async fn generate_prompts(&mut self) -> Result<(), WizardError> {
        self.require_step(Step::AnalysisReview, "generate")?;
        let Some(analysis) = self.session.analysis().cloned() else {
            return self.report(WizardError::Validation(MISSING_ANALYSIS.to_string()));
        };

        self.begin_loading(GENERATE_LOADING);
        let outcome = self.service.generate_prompts(&analysis).await;
        self.end_loading();

        match outcome {
            Ok(response) => {
                log::info!("Received {} prompt strategies", response.prompts.len());
                self.view.gallery = Some(render_gallery(
                    &response.prompts,
                    response.selection_message.as_deref(),
                ));
                self.session.set_prompts(response.prompts);
                self.go_to_step(Step::StrategySelection);
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    /// Step 3: keep one candidate from the current gallery.
    pub fn select_prompt(&mut self, candidate: PromptCandidate) -> Result<(), WizardError> {
        self.require_step(Step::StrategySelection, "select")?;
        let offered = self
            .session
            .prompts()
            .is_some_and(|set| set.prompts.contains(&candidate));
        if !offered {
            return self.report(WizardError::Validation(format!(
                "'{}' 전략은 생성된 목록에 없습니다.",
                candidate.name
            )));
        }

        log::info!("Strategy selected: {}", candidate.name);
        self.view.final_prompt = Some(render_final(&candidate));
        self.reset_copy_button();
        self.session.set_selected(candidate);
        self.go_to_step(Step::FinalPrompt);
        Ok(())
    }

    /// Open or close the prompt preview of gallery card `number` (1-based).
    pub fn toggle_preview(&mut self, number: usize) -> Result<(), WizardError> {
        self.require_step(Step::StrategySelection, "show")?;
        let toggled = self
            .view
            .gallery
            .as_mut()
            .and_then(|g| g.cards.iter_mut().find(|c| c.number == number))
            .map(|card| card.preview.expanded = !card.preview.expanded)
            .is_some();
        if !toggled {
            return self.report(WizardError::Validation(format!(
                "{}번 전략이 없습니다.",
                number
            )));
        }
        self.publish();
        Ok(())
    }

    /// Step 4: put the displayed prompt on the clipboard.
    pub fn copy_prompt(&mut self, now: Instant) -> Result<(), WizardError> {
        self.require_step(Step::FinalPrompt, "copy")?;
        let Some(text) = self.view.final_prompt.as_ref().map(|v| v.prompt.clone()) else {
            return self.report(WizardError::Validation(NOTHING_TO_COPY.to_string()));
        };

        if let Err(e) = self.clipboard.set_text(&text) {
            log::warn!("Clipboard write failed: {}", e);
            return self.report(WizardError::Clipboard(COPY_FAILED.to_string()));
        }

        self.view.copy_button = CopyButton {
            label: COPIED_LABEL,
            confirmed: true,
        };
        self.copied_at = Some(now);
        self.publish();
        Ok(())
    }

    /// When the copy confirmation should revert, if one is showing.
    pub fn copy_feedback_deadline(&self) -> Option<Instant> {
        self.copied_at.map(|at| at + self.copy_feedback)
    }

    /// Revert the copy confirmation once its deadline has passed. Returns
    /// whether anything changed.
    pub fn expire_copy_feedback(&mut self, now: Instant) -> bool {
        match self.copy_feedback_deadline() {
            Some(deadline) if now >= deadline => {
                self.reset_copy_button();
                self.publish();
                true
            }
            _ => false,
        }
    }

    /// Throw the whole run away and go back to an empty step 1.
    pub fn restart(&mut self) {
        self.session.clear();
        self.view.input.query.clear();
        self.view.analysis = None;
        self.view.gallery = None;
        self.view.final_prompt = None;
        self.view.notification = None;
        self.view.loading = None;
        self.reset_copy_button();
        for indicator in self.view.indicators.iter_mut() {
            indicator.completed = false;
        }
        log::info!("Workflow restarted");
        self.go_to_step(Step::Input);
    }

    /// Fetch the strategy catalogue. Does not touch the step or the session.
    pub async fn load_strategies(&mut self) -> Result<(), WizardError> {
        self.begin_loading(STRATEGIES_LOADING);
        let outcome = self.service.list_strategies().await;
        self.end_loading();

        match outcome {
            Ok(strategies) => {
                self.view.catalog = Some(strategies);
                self.publish();
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    /// Surface `err` to the user and hand it back to the caller.
    pub fn report(&mut self, err: WizardError) -> Result<(), WizardError> {
        log::warn!("{:?} error: {}", err.kind(), err);
        self.notifications += 1;
        self.view.notification = Some(Notification {
            id: self.notifications,
            message: err.to_string(),
        });
        self.publish();
        Err(err)
    }

    /// Steps only advance 1 -> 2 -> 3 -> 4; anything else goes through restart.
    fn require_step(&mut self, expected: Step, action: &str) -> Result<(), WizardError> {
        let step = self.view.current_step;
        if step == expected {
            return Ok(());
        }
        log::debug!("Rejected '{}' on step {}", action, step.number());
        self.report(wrong_step(action, step))
    }

    fn begin_loading(&mut self, message: &str) {
        self.view.notification = None;
        self.view.loading = Some(message.to_string());
        self.publish();
    }

    fn end_loading(&mut self) {
        self.view.loading = None;
        self.publish();
    }

    fn reset_copy_button(&mut self) {
        self.view.copy_button = CopyButton::default();
        self.copied_at = None;
    }

    fn publish(&self) {
        self.publisher.send_replace(self.view.clone());
    }
}

fn index(step: Step) -> usize {
    usize::from(step.number() - 1)
}
