//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod render;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use imgdir_config::{CliSettings, Config};
use imgdir_core::{DirectiveApplier, TokenizePolicy};
use imgdir_html::PageRenderer;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;

/// Options shared by commands that render Markdown.
#[derive(Args)]
pub(crate) struct RenderOptions {
    /// Path to configuration file (default: auto-discover imgdir.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How directive segments are scanned (overrides config).
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Render tooltips without directives as captions (overrides config).
    #[arg(long)]
    plain_title_captions: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderOptions {
    /// Load configuration and build the page renderer.
    pub(crate) fn renderer(&self) -> Result<PageRenderer, CliError> {
        let cli_settings = CliSettings {
            policy: self.policy.map(TokenizePolicy::from),
            from_plain_titles: self.plain_title_captions.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        Ok(PageRenderer::new()
            .with_applier(DirectiveApplier::new(&config.applier_config()))
            .with_caption_class(config.captions.class))
    }
}

/// Tokenizer policy as accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum PolicyArg {
    /// Scan segments left to right, dropping unrecognized ones.
    Forward,
    /// Scan from the end, stopping at the first unrecognized segment.
    Trailing,
}

impl From<PolicyArg> for TokenizePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Forward => Self::Forward,
            PolicyArg::Trailing => Self::Trailing,
        }
    }
}
