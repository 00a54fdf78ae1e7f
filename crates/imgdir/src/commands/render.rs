//! `imgdir render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;

use super::RenderOptions;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the markdown file.
    file: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    pub options: RenderOptions,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, reading or writing fails.
    /// Unparseable directives are reported as warnings only.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let renderer = self.options.renderer()?;

        let markdown = std::fs::read_to_string(&self.file)?;
        let result = renderer.render(&markdown);

        for diagnostic in &result.report.diagnostics {
            output.diagnostic(&self.file, diagnostic);
        }
        if !result.report.diagnostics.is_empty() {
            output.warning("Unparseable annotations were left unchanged");
        }

        let html = result.page.to_html();
        match &self.output {
            Some(path) => {
                write_file(path, &html)?;
                output.success(&format!(
                    "Rendered {} ({} images) to {}",
                    self.file.display(),
                    result.report.processed,
                    path.display()
                ));
            }
            None => std::io::stdout().lock().write_all(html.as_bytes())?,
        }

        Ok(())
    }
}

fn write_file(path: &Path, html: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn args(file: PathBuf, output: Option<PathBuf>, config: PathBuf) -> RenderArgs {
        RenderArgs {
            file,
            output,
            options: RenderOptions {
                config: Some(config),
                policy: None,
                plain_title_captions: false,
                verbose: false,
            },
        }
    }

    #[test]
    fn test_render_to_file() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("imgdir.toml");
        std::fs::write(&config, "").unwrap();
        let input = dir.path().join("page.md");
        std::fs::write(&input, "![Chart|size=80x40](chart.png)\n").unwrap();
        let out = dir.path().join("site/page.html");

        args(input, Some(out.clone()), config).execute().unwrap();

        assert_eq!(
            std::fs::read_to_string(out).unwrap(),
            "<p><img src=\"chart.png\" alt=\"Chart\" data-imgdir-processed=\"true\" \
             style=\"width: 80px; height: 40px\"></p>\n"
        );
    }

    #[test]
    fn test_render_with_diagnostics_succeeds() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("imgdir.toml");
        std::fs::write(&config, "").unwrap();
        let input = dir.path().join("page.md");
        std::fs::write(&input, "![Photo|sizeXX=80](p.png)\n").unwrap();
        let out = dir.path().join("page.html");

        args(input, Some(out.clone()), config).execute().unwrap();

        assert!(
            std::fs::read_to_string(out)
                .unwrap()
                .contains(r#"alt="Photo|sizeXX=80""#)
        );
    }

    #[test]
    fn test_render_missing_input() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("imgdir.toml");
        std::fs::write(&config, "").unwrap();

        let result = args(dir.path().join("missing.md"), None, config).execute();

        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
