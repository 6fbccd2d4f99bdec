use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use mdrender::color::ColorDepth;
use mdrender::config::loader;
use mdrender::input;
use mdrender::markdown::{self, RenderOptions};
use mdrender::theme::{Background, ResolvedTheme};

#[derive(Parser)]
#[command(name = "mdrender", version, about = "Render markdown for the terminal")]
struct Cli {
    /// Markdown file to render, or markdown text. Reads stdin when omitted.
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Path to config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging to stderr.
    #[arg(long)]
    debug: bool,

    /// Syntax-highlight fenced code blocks.
    #[arg(long)]
    highlight: bool,

    /// Use colors for a light terminal background.
    #[arg(long)]
    light: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with rendered output.
    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    let config = loader::load_config(cli.config.as_deref())?;

    let background = if cli.light {
        Background::Light
    } else {
        Background::detect()
    };
    let options = RenderOptions {
        theme: ResolvedTheme::resolve(&config.theme, background),
        depth: ColorDepth::detect(),
        syntax_highlight: cli.highlight || config.render.syntax_highlight,
    };
    tracing::debug!(?background, depth = ?options.depth, "terminal settings");

    let document = input::read_document(cli.input.as_deref())?;

    markdown::force_styled_output();
    let rendered = markdown::render_with(&document, &options);

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
