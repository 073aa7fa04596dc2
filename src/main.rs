//! quill - CLI entry point.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quill::config::{self, CliOverrides, Style};
use quill::error::Error;
use quill::git::{ShellGit, check_git_installed};
use quill::provider;
use quill::review::{InteractionController, Outcome};
use quill::ui::{ReviewUi, TerminalUi};

/// AI-assisted commit message generator for Git.
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Generate a commit message for staged changes with an AI provider")]
#[command(version)]
struct Cli {
    /// Commit message style (default: conventional)
    #[arg(short, long, value_enum)]
    style: Option<Style>,

    /// AI provider: openrouter, openai, or anthropic (default: openrouter)
    #[arg(short, long)]
    provider: Option<String>,

    /// Model to use (provider default otherwise)
    #[arg(short, long)]
    model: Option<String>,

    /// API key for the AI provider (falls back to the provider's environment variable)
    #[arg(short = 'k', long = "api-key")]
    api_key: Option<String>,

    /// Commit without confirmation
    #[arg(long)]
    auto_commit: bool,

    /// Include the model's reasoning in the output
    #[arg(long)]
    explain: bool,

    /// Reserved; accepted for compatibility, unused by the main flow
    #[arg(short, long)]
    regenerate: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Cancellation is a normal ending, not a failure.
    match run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            render_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Outcome, Error> {
    let overrides = CliOverrides {
        style: cli.style,
        provider: cli.provider,
        model: cli.model,
        api_key: cli.api_key,
        auto_commit: cli.auto_commit,
        explain: cli.explain,
    };
    let config = config::load_config(Path::new("."), overrides);

    // Pre-flight: provider, API key, and git must all resolve before any
    // context collection or network work starts.
    let provider = provider::create_provider(&config.provider)?;
    provider::ensure_api_key(&config)?;
    check_git_installed()?;

    let git = ShellGit::new();
    let ui = TerminalUi;

    ui.info("Analyzing staged changes...");

    InteractionController::new(&config, provider.as_ref(), &git, &ui)
        .run()
        .await
}

fn render_error(err: &Error) {
    match err {
        Error::Git(e) => {
            eprintln!("error: {e}");
            eprintln!("hint: make sure you are in a git repository and have staged changes.");
        }
        Error::Config(e) => eprintln!("error: {e}"),
        Error::Provider(e) => eprintln!("error: {e}"),
        Error::Unexpected(e) => eprintln!("unexpected error: {e:#}"),
    }
}
