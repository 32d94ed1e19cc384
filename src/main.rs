// IsCoolGPT - tutoring backend
// Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use iscool::cli::{run_check, run_list_models, Cli, Command, ServeArgs};
use iscool::config::Settings;
use iscool::providers::create_provider;
use iscool::server::TutorServer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = Settings::from_env()?;

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => {
            args.apply(&mut settings);
            serve(settings)
        }
        Command::Check => run_check(&settings),
        Command::ListModels => run_list_models(&settings),
    }
}

/// Build the provider, then the runtime, then serve.
///
/// The provider is constructed before the runtime exists: the Gemini client is
/// blocking and must not be created on an async worker.
fn serve(settings: Settings) -> Result<()> {
    let provider = create_provider(&settings).context("Failed to initialise LLM provider")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .max_blocking_threads(settings.worker_threads.max(1))
        .thread_name("iscool-worker")
        .build()
        .context("Failed to build tokio runtime")?;

    let server = TutorServer::new(&settings, provider);
    runtime.block_on(server.serve())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
