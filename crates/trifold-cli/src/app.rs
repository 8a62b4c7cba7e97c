//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use trifold_compose::{write_artifact, Canvas, DeckComposer, DeckDescription, Theme};
use trifold_core::{load_source, paginate, parse, StyleRuleset};
use trifold_docx::{Cover, DocxOptions, DocxRenderer};
use trifold_pdf::{Compiler, PdfRenderer};
use trifold_pptx::{PptxRenderer, PptxWriter};

#[derive(Parser)]
#[command(name = "trifold")]
#[command(author, version, about = "Slides, documents and PDFs from one content model", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a deck description into a PPTX presentation
    Deck {
        /// Input deck description (TOML)
        input: PathBuf,

        /// Output PPTX file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a markdown file to DOCX
    Doc {
        /// Input markdown file
        input: PathBuf,

        /// Output DOCX file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Start with a cover page
        #[arg(long)]
        cover: bool,

        /// Add a table of contents after the cover
        #[arg(long)]
        toc: bool,
    },

    /// Render a markdown file to a paginated PDF
    Pdf {
        /// Input markdown file
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Footer label
        #[arg(long)]
        label: Option<String>,

        /// Font file to embed (repeatable)
        #[arg(long)]
        font: Vec<PathBuf>,
    },

    /// Print the composed canvases of a deck as JSON
    Layout {
        /// Input deck description (TOML)
        input: PathBuf,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Deck { input, output } => {
            deck_command(&input, output.as_deref())?;
        }
        Commands::Doc {
            input,
            output,
            cover,
            toc,
        } => {
            doc_command(&input, output.as_deref(), cover, toc)?;
        }
        Commands::Pdf {
            input,
            output,
            label,
            font,
        } => {
            pdf_command(&input, output.as_deref(), label.as_deref(), &font)?;
        }
        Commands::Layout { input } => {
            layout_command(&input)?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` refines the default level
fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn output_path(input: &Path, output: Option<&Path>, extension: &str) -> PathBuf {
    match output {
        Some(p) => p.to_path_buf(),
        None => input.with_extension(extension),
    }
}

fn compose_deck(input: &Path) -> Result<(DeckDescription, Theme, Vec<Canvas>)> {
    let deck = DeckDescription::load(input)
        .with_context(|| format!("Failed to load deck: {}", input.display()))?;
    let theme = deck
        .theme(&Theme::default())
        .context("Invalid theme overrides")?;
    let canvases = DeckComposer::new(&theme)
        .compose(&deck)
        .with_context(|| format!("Failed to compose deck: {}", input.display()))?;
    debug!(slides = canvases.len(), "composed deck");
    Ok((deck, theme, canvases))
}

/// Execute the deck command
pub fn deck_command(input: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let (deck, theme, canvases) = compose_deck(input)?;
    let output_path = output_path(input, output, "pptx");

    let renderer = PptxRenderer::new(PptxWriter::for_deck(&deck));
    let size = write_artifact(&renderer, &canvases[..], &theme, &output_path)
        .with_context(|| format!("Failed to write presentation: {}", output_path.display()))?;

    println!("Created: {}", output_path.display());
    println!("  Slides: {}", canvases.len());
    println!("  Size: {} bytes", size);

    Ok(output_path)
}

/// Execute the doc command
pub fn doc_command(input: &Path, output: Option<&Path>, cover: bool, toc: bool) -> Result<PathBuf> {
    let source = load_source(input)?;
    let doc = parse(&source);
    let output_path = output_path(input, output, "docx");

    let options = DocxOptions {
        cover: cover.then(|| Cover::from_document(&doc)),
        toc,
        ..DocxOptions::default()
    };
    let size = write_artifact(
        &DocxRenderer::new(options),
        &doc,
        &Theme::default(),
        &output_path,
    )
    .with_context(|| format!("Failed to write document: {}", output_path.display()))?;

    println!("Created: {}", output_path.display());
    println!("  Blocks: {}", doc.blocks.len());
    println!("  Size: {} bytes", size);

    Ok(output_path)
}

/// Execute the pdf command
pub fn pdf_command(
    input: &Path,
    output: Option<&Path>,
    label: Option<&str>,
    fonts: &[PathBuf],
) -> Result<PathBuf> {
    let source = load_source(input)?;
    let ruleset = label.map(StyleRuleset::with_label).unwrap_or_default();
    let flow = paginate(&parse(&source), &ruleset);
    let output_path = output_path(input, output, "pdf");

    let compiler = fonts
        .iter()
        .fold(Compiler::new(), |compiler, font| compiler.with_font(font));
    let size = write_artifact(
        &PdfRenderer::new(compiler),
        &flow,
        &Theme::default(),
        &output_path,
    )
    .with_context(|| format!("Failed to write PDF: {}", output_path.display()))?;

    println!(
        "PDF generated: {} ({:.1} KB)",
        output_path.display(),
        size as f64 / 1024.0
    );

    Ok(output_path)
}

/// Composed canvases of a deck as pretty JSON
pub fn layout_json(input: &Path) -> Result<String> {
    let (_, _, canvases) = compose_deck(input)?;
    serde_json::to_string_pretty(&canvases).context("Failed to serialize layout")
}

/// Execute the layout command
pub fn layout_command(input: &Path) -> Result<()> {
    println!("{}", layout_json(input)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            output_path(Path::new("docs/plan.md"), None, "docx"),
            PathBuf::from("docs/plan.docx")
        );
        assert_eq!(
            output_path(Path::new("plan.md"), Some(Path::new("out.pdf")), "pdf"),
            PathBuf::from("out.pdf")
        );
    }

    #[test]
    fn test_parse_pdf_args() {
        let cli = Cli::try_parse_from([
            "trifold", "-v", "pdf", "plan.md", "--label", "Board", "--font", "a.ttf",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Pdf { label, font, .. } => {
                assert_eq!(label.as_deref(), Some("Board"));
                assert_eq!(font, vec![PathBuf::from("a.ttf")]);
            }
            _ => panic!("expected pdf command"),
        }
    }
}
