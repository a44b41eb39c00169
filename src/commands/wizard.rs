use tokio::time::Instant;

use crate::error::WizardError;
use crate::models::Step;
use crate::services::api_client::PromptService;
use crate::services::clipboard::ClipboardSink;
use crate::services::wizard::{wrong_step, WizardController};

/// A user action, as produced by whatever front end is driving the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardCommand {
    /// Replace the input text and analyze it.
    Submit(String),
    /// Analyze whatever is already in the input field.
    Analyze,
    Generate,
    /// Pick gallery card `n` (1-based).
    Select(usize),
    TogglePreview(usize),
    Copy,
    Restart,
    Strategies,
}

impl WizardCommand {
    pub fn name(&self) -> &'static str {
        match self {
            WizardCommand::Submit(_) | WizardCommand::Analyze => "analyze",
            WizardCommand::Generate => "generate",
            WizardCommand::Select(_) => "select",
            WizardCommand::TogglePreview(_) => "show",
            WizardCommand::Copy => "copy",
            WizardCommand::Restart => "restart",
            WizardCommand::Strategies => "strategies",
        }
    }

    /// Only the active step's actions are on screen.
    pub fn is_available_on(&self, step: Step) -> bool {
        match self {
            WizardCommand::Submit(_) | WizardCommand::Analyze => step == Step::Input,
            WizardCommand::Generate => step == Step::AnalysisReview,
            WizardCommand::Select(_) | WizardCommand::TogglePreview(_) => {
                step == Step::StrategySelection
            }
            WizardCommand::Copy => step == Step::FinalPrompt,
            WizardCommand::Restart | WizardCommand::Strategies => true,
        }
    }
}

pub async fn dispatch<S, C>(
    controller: &mut WizardController<S, C>,
    command: WizardCommand,
) -> Result<(), WizardError>
where
    S: PromptService,
    C: ClipboardSink,
{
    let step = controller.current_step();
    if !command.is_available_on(step) {
        log::debug!("Rejected '{}' on step {}", command.name(), step.number());
        return controller.report(wrong_step(command.name(), step));
    }

    match command {
        WizardCommand::Submit(text) => {
            controller.set_query(text);
            controller.analyze_query().await
        }
        WizardCommand::Analyze => controller.analyze_query().await,
        WizardCommand::Generate => controller.generate_prompts().await,
        WizardCommand::Select(number) => {
            let candidate = controller
                .view()
                .gallery
                .as_ref()
                .and_then(|g| g.cards.iter().find(|c| c.number == number))
                .map(|card| card.select.clone());
            match candidate {
                Some(candidate) => controller.select_prompt(candidate),
                None => controller.report(WizardError::Validation(format!(
                    "{}번 전략이 없습니다.",
                    number
                ))),
            }
        }
        WizardCommand::TogglePreview(number) => controller.toggle_preview(number),
        WizardCommand::Copy => controller.copy_prompt(Instant::now()),
        WizardCommand::Restart => {
            controller.restart();
            Ok(())
        }
        WizardCommand::Strategies => controller.load_strategies().await,
    }
}

/// What a line of console input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Command(WizardCommand),
    Help,
    Quit,
    Empty,
    Invalid(String),
}

/// Parse one line typed at the console. On step 1 bare text is the query;
/// elsewhere it must be a command word.
pub fn parse_line(line: &str, step: Step) -> ConsoleInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ConsoleInput::Empty;
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    let numbered = |make: fn(usize) -> WizardCommand| match rest.parse::<usize>() {
        Ok(n) if n > 0 => ConsoleInput::Command(make(n)),
        _ => ConsoleInput::Invalid(format!("'{}' 뒤에 카드 번호를 입력하세요.", word)),
    };

    match word.to_lowercase().as_str() {
        "help" | "?" => ConsoleInput::Help,
        "quit" | "exit" => ConsoleInput::Quit,
        "analyze" if rest.is_empty() => ConsoleInput::Command(WizardCommand::Analyze),
        "analyze" => ConsoleInput::Command(WizardCommand::Submit(rest.to_string())),
        "generate" | "next" => ConsoleInput::Command(WizardCommand::Generate),
        "select" => numbered(WizardCommand::Select),
        "show" => numbered(WizardCommand::TogglePreview),
        "copy" => ConsoleInput::Command(WizardCommand::Copy),
        "restart" => ConsoleInput::Command(WizardCommand::Restart),
        "strategies" => ConsoleInput::Command(WizardCommand::Strategies),
        _ if step == Step::Input => {
            ConsoleInput::Command(WizardCommand::Submit(trimmed.to_string()))
        }
        _ => ConsoleInput::Invalid(format!("알 수 없는 명령입니다: {}", word)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_text_is_a_query_only_on_step_one() {
        assert_eq!(
            parse_line("마케팅 이메일 작성법", Step::Input),
            ConsoleInput::Command(WizardCommand::Submit("마케팅 이메일 작성법".into()))
        );
        assert!(matches!(
            parse_line("마케팅 이메일 작성법", Step::AnalysisReview),
            ConsoleInput::Invalid(_)
        ));
    }

    #[test]
    fn command_words() {
        assert_eq!(
            parse_line("  select 3 ", Step::StrategySelection),
            ConsoleInput::Command(WizardCommand::Select(3))
        );
        assert_eq!(
            parse_line("show 1", Step::StrategySelection),
            ConsoleInput::Command(WizardCommand::TogglePreview(1))
        );
        assert_eq!(
            parse_line("analyze", Step::Input),
            ConsoleInput::Command(WizardCommand::Analyze)
        );
        assert_eq!(
            parse_line("analyze  블로그 글", Step::Input),
            ConsoleInput::Command(WizardCommand::Submit("블로그 글".into()))
        );
        assert_eq!(parse_line("Copy", Step::FinalPrompt), ConsoleInput::Command(WizardCommand::Copy));
        assert_eq!(parse_line("quit", Step::Input), ConsoleInput::Quit);
        assert_eq!(parse_line("   ", Step::Input), ConsoleInput::Empty);
    }

    #[test]
    fn select_needs_a_positive_number() {
        assert!(matches!(parse_line("select", Step::StrategySelection), ConsoleInput::Invalid(_)));
        assert!(matches!(parse_line("select 0", Step::StrategySelection), ConsoleInput::Invalid(_)));
        assert!(matches!(parse_line("select x", Step::StrategySelection), ConsoleInput::Invalid(_)));
    }

    #[test]
    fn availability_follows_the_active_step() {
        assert!(WizardCommand::Analyze.is_available_on(Step::Input));
        assert!(!WizardCommand::Analyze.is_available_on(Step::StrategySelection));
        assert!(WizardCommand::Generate.is_available_on(Step::AnalysisReview));
        assert!(!WizardCommand::Generate.is_available_on(Step::Input));
        assert!(WizardCommand::Select(1).is_available_on(Step::StrategySelection));
        assert!(!WizardCommand::Copy.is_available_on(Step::StrategySelection));
        for step in Step::ALL {
            assert!(WizardCommand::Restart.is_available_on(step));
            assert!(WizardCommand::Strategies.is_available_on(step));
        }
    }
}
