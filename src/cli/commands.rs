// Operator subcommands
//
// Both run synchronously before any async runtime exists, which is what the
// blocking Gemini client requires.

use anyhow::{bail, Context, Result};

use super::checklist::Checklist;
use crate::config::Settings;
use crate::providers::GeminiClient;

/// Print the setup checklist. Errors when any required item fails.
pub fn run_check(settings: &Settings) -> Result<()> {
    let checklist = Checklist::from_settings(settings);
    print!("{}", checklist);

    if !checklist.passed() {
        bail!(
            "{} configuration check(s) failed; fix the items marked ✗",
            checklist.failures()
        );
    }

    println!("All checks passed. Start the server with: iscool serve");
    Ok(())
}

/// Print the Gemini models visible to the configured key as JSON.
pub fn run_list_models(settings: &Settings) -> Result<()> {
    let api_key = settings
        .gemini_api_key
        .clone()
        .context("GEMINI_API_KEY is not set")?;

    let client = GeminiClient::new(api_key, settings.gemini_base_url.clone())?;
    let models = client.list_models().context("Failed to list Gemini models")?;

    tracing::debug!(count = models.len(), "Fetched Gemini model list");
    println!("{}", serde_json::to_string_pretty(&models)?);
    Ok(())
}
