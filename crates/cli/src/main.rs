//! toolhand — interactive tool-using AI assistant for the terminal.
//!
//! Wires configuration, the completion provider, the tool catalog, and the
//! agent loop together, then hands control to the interactive shell (or
//! answers a single `--message` and exits).

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use toolhand_agent::{system_prompt, AgentLoop, RetryPolicy};
use toolhand_config::Settings;
use toolhand_core::session::Session;
use toolhand_providers::OpenAiCompatProvider;

mod repl;

#[derive(Parser)]
#[command(
    name = "toolhand",
    about = "Interactive AI assistant with local tool execution",
    version
)]
struct Cli {
    /// Send a single message instead of entering interactive mode
    #[arg(short, long)]
    message: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("toolhand: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli, settings).await {
        eprintln!("toolhand: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let working_dir = std::env::current_dir()?;

    let provider = OpenAiCompatProvider::new(
        "openai-compat",
        &settings.base_url,
        &settings.api_key,
        Duration::from_secs(settings.request_timeout_secs),
    )?;

    let tools = Arc::new(toolhand_tools::default_registry(&working_dir));
    let agent = AgentLoop::new(
        Arc::new(provider),
        &settings.model,
        settings.temperature,
        tools,
        RetryPolicy::new(settings.max_retries),
    );

    let mut session = Session::new(system_prompt(&working_dir), working_dir)
        .with_max_steps(settings.max_steps)
        .with_max_history(settings.max_history)
        .with_max_retries(settings.max_retries);

    if let Some(message) = cli.message {
        let answer = agent.run_turn(&mut session, &message).await?;
        println!("{answer}");
        return Ok(());
    }

    repl::run(&agent, &mut session, &settings.model).await?;
    Ok(())
}
