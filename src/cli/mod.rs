// Command-line interface
//
// `iscool` with no subcommand serves HTTP. `check` and `list-models` are
// operator helpers for verifying a deployment's configuration.

pub mod checklist;
pub mod commands;

pub use checklist::{CheckItem, CheckStatus, Checklist};
pub use commands::{run_check, run_list_models};

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "iscool",
    version,
    about = "IsCoolGPT tutoring backend - answers teaching requests with a configurable LLM"
)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG when set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve(ServeArgs),
    /// Verify configuration for the selected provider and exit
    Check,
    /// List the Gemini models available to the configured key
    ListModels,
}

#[derive(clap::Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Host to bind (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Provider selector: openai, gemini or mock (overrides LLM_PROVIDER)
    #[arg(long)]
    pub provider: Option<String>,
}

impl ServeArgs {
    /// Apply command-line overrides on top of environment settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(provider) = &self.provider {
            settings.llm_provider = provider.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["iscool"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from([
            "iscool", "serve", "--host", "127.0.0.1", "--port", "9000", "--provider", "gemini",
        ])
        .unwrap();

        let args = match cli.command {
            Some(Command::Serve(args)) => args,
            other => panic!("expected serve, got {:?}", other),
        };

        let mut settings = Settings::default();
        args.apply(&mut settings);
        assert_eq!(settings.bind_address(), "127.0.0.1:9000");
        assert_eq!(settings.llm_provider, "gemini");
    }

    #[test]
    fn test_subcommands_parse() {
        let cli = Cli::try_parse_from(["iscool", "--verbose", "check"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Command::Check)));

        let cli = Cli::try_parse_from(["iscool", "list-models"]).unwrap();
        assert!(matches!(cli.command, Some(Command::ListModels)));
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["iscool", "serve", "--port", "70000"]).is_err());
    }
}
