//! Review command - Send a patch to the configured backend

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use patchwing_core::{ReviewConfig, ReviewRequester};

/// Arguments for the review command
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Path to the patch file; reads stdin when omitted or "-"
    pub patch_file: Option<PathBuf>,

    /// Custom review instruction (overrides config and env)
    #[arg(long)]
    pub prompt: Option<String>,
}

impl ReviewArgs {
    /// Execute the review command
    pub async fn execute(&self, verbose: bool, config: &ReviewConfig) -> anyhow::Result<()> {
        let patch = self.read_patch()?;

        if patch.trim().is_empty() {
            tracing::warn!("Empty patch, nothing to review");
            return Ok(());
        }

        let config = config.clone().with_cli_overrides(None, None, self.prompt.clone());
        let mut requester = ReviewRequester::new(&config);

        if !requester.is_configured() {
            tracing::warn!(
                "No provider credentials configured (OPENAI_API_KEY or \
                 AZURE_OPENAI_API_KEY + AZURE_OPENAI_ENDPOINT); review will be empty"
            );
        }

        if verbose {
            requester = requester.with_timing_hook(Box::new(|elapsed| {
                tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "Review round trip");
            }));
        }

        let review = requester.code_review(&patch).await?;
        println!("{}", review);

        Ok(())
    }

    /// Read the patch from the given file, or stdin for "-" / no argument
    fn read_patch(&self) -> anyhow::Result<String> {
        match &self.patch_file {
            Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
            _ => {
                let mut patch = String::new();
                std::io::stdin().read_to_string(&mut patch)?;
                Ok(patch)
            }
        }
    }
}
