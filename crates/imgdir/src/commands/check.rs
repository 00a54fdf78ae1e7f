//! `imgdir check` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use imgdir_core::Diagnostic;
use imgdir_html::PageRenderer;

use super::RenderOptions;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Markdown files to check.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[command(flatten)]
    pub options: RenderOptions,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::DiagnosticsFound`] if any file contains directives
    /// that could not be parsed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let renderer = self.options.renderer()?;

        let mut found = 0;
        for file in &self.files {
            output.info(&format!("Checking {}...", file.display()));
            let diagnostics = check_file(&renderer, file)?;
            for diagnostic in &diagnostics {
                output.diagnostic(file, diagnostic);
            }
            found += diagnostics.len();
        }

        if found > 0 {
            return Err(CliError::DiagnosticsFound(found));
        }

        output.success(&format!("No problems found in {} file(s)", self.files.len()));
        Ok(())
    }
}

/// Render a file and return the diagnostics of its directive pass.
fn check_file(renderer: &PageRenderer, path: &Path) -> Result<Vec<Diagnostic>, CliError> {
    let markdown = std::fs::read_to_string(path)?;
    Ok(renderer.render(&markdown).report.diagnostics)
}
