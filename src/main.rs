mod console;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

use promptflow::commands::{dispatch, parse_line, ConsoleInput, WizardCommand};
use promptflow::models::Settings;
use promptflow::utils::config::{self, DEFAULT_SETTINGS_PATH};
use promptflow::{HttpPromptService, PromptService, SystemClipboard, WizardController, WizardError};

#[derive(Parser, Debug)]
#[command(name = "promptflow")]
#[command(version)]
#[command(about = "Turn a request into prompt-engineering strategies and keep the best one", long_about = None)]
struct Cli {
    /// Settings file (JSON). Missing file means defaults.
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,

    /// Base URL of the analysis / prompt-generation service.
    #[arg(long)]
    api_base_url: Option<String>,

    /// Print HTML fragments instead of plain text.
    #[arg(long)]
    markup: bool,

    /// Skip the start-up health probe.
    #[arg(long)]
    no_health_check: bool,

    /// Submit this request immediately.
    #[arg(long, short)]
    query: Option<String>,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.api_base_url {
            settings.api.base_url = url.clone();
        }
        if self.markup {
            settings.ui.markup = true;
        }
        if self.no_health_check {
            settings.api.health_check_on_start = false;
        }
    }
}

fn main() -> Result<()> {
    config::load_dotenv();
    let cli = Cli::parse();

    let mut settings = config::load_settings(&cli.config)?;
    config::apply_env_defaults(&mut settings);
    cli.apply(&mut settings);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.logging.level.as_str()),
    )
    .init();

    if !cli.config.exists() {
        log::debug!("No settings file at {}, using defaults", cli.config.display());
    }
    log::debug!("Using backend at {}", settings.api.base_url);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(run(settings, cli.query))
}

async fn run(settings: Settings, initial_query: Option<String>) -> Result<()> {
    let service = HttpPromptService::new(settings.api.base_url.as_str())
        .context("failed to build HTTP client")?;

    if settings.api.health_check_on_start {
        match service.health().await {
            Ok(status) => log::info!("Backend at {} is {}", service.base_url(), status),
            Err(e) => log::warn!("Backend health check at {} failed: {}", service.base_url(), e),
        }
    }

    let mut controller = WizardController::with_copy_feedback(
        service,
        SystemClipboard::new(),
        Duration::from_millis(settings.ui.copy_feedback_ms),
    );
    let renderer = tokio::spawn(console::render_loop(
        controller.subscribe(),
        settings.ui.markup,
    ));

    console::print_help();

    if let Some(query) = initial_query {
        run_command(&mut controller, WizardCommand::Submit(query)).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let deadline = controller.copy_feedback_deadline();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    break;
                };
                match parse_line(&line, controller.current_step()) {
                    ConsoleInput::Command(command) => run_command(&mut controller, command).await,
                    ConsoleInput::Help => console::print_help(),
                    ConsoleInput::Quit => break,
                    ConsoleInput::Empty => {}
                    ConsoleInput::Invalid(message) => {
                        let _ = controller.report(WizardError::Validation(message));
                    }
                }
            }
            _ = sleep_until(deadline) => {
                controller.expire_copy_feedback(Instant::now());
            }
        }
    }

    // Dropping the controller closes the view channel and ends the renderer.
    drop(controller);
    renderer.await.context("renderer task failed")?;
    Ok(())
}

async fn run_command(
    controller: &mut WizardController<HttpPromptService, SystemClipboard>,
    command: WizardCommand,
) {
    let name = command.name();
    if let Err(e) = dispatch(controller, command).await {
        log::debug!("'{}' ended with {:?} error", name, e.kind());
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
