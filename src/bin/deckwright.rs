//! Command-line front end.
//!
//! Build a deck:
//! ```sh
//! deckwright build --topic "Rust" --description-file about.txt \
//!     --pricing plans.yaml --image logo.png -o rust.pptx
//! ```
//!
//! List the slides of a presentation:
//! ```sh
//! deckwright inspect rust.pptx
//! ```

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use deckwright::collab::{PricingEntry, PricingFile, PricingSource};
use deckwright::deck::{DeckContent, DeckPlan, compose};
use deckwright::{ImageSource, SlideKind, inspect};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Assemble slide decks as PowerPoint (.pptx) files
#[derive(Parser, Debug)]
#[command(name = "deckwright", version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a presentation from a topic and optional content
    Build(BuildArgs),
    /// List the slides of a presentation
    Inspect {
        /// Presentation to read
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct BuildArgs {
    /// Deck topic, used as the title slide's title
    #[arg(short, long)]
    topic: String,

    /// Narrative body for the text and bullet slides
    #[arg(short, long, conflicts_with = "description_file")]
    description: Option<String>,

    /// Read the narrative body from a file
    #[arg(long, value_name = "FILE")]
    description_file: Option<PathBuf>,

    /// Image for the image slide
    #[arg(long, value_name = "FILE")]
    image: Option<PathBuf>,

    /// Pricing plans (YAML or JSON list of entries)
    #[arg(long, value_name = "FILE")]
    pricing: Option<PathBuf>,

    /// Deck plan (YAML)
    #[arg(long, value_name = "FILE")]
    plan: Option<PathBuf>,

    /// Title slide subtitle, overriding the plan's
    #[arg(long)]
    subtitle: Option<String>,

    /// Output file
    #[arg(short, long, value_name = "OUTPUT", default_value = "generated_presentation.pptx")]
    output: PathBuf,

    /// Overwrite an existing output file
    #[arg(short, long)]
    force: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Args::parse().command {
        Command::Build(args) => build(args),
        Command::Inspect { input } => inspect_file(&input),
    }
}

fn build(args: BuildArgs) -> Result<()> {
    if args.topic.trim().is_empty() {
        bail!("--topic must not be empty");
    }

    let mut plan = match args.plan {
        Some(ref path) => DeckPlan::from_path(path)?,
        None => DeckPlan::default(),
    };
    if let Some(subtitle) = args.subtitle {
        plan.subtitle = subtitle;
    }

    let body = match (args.description, args.description_file) {
        (Some(text), _) => Some(text),
        (None, Some(path)) => Some(
            std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?,
        ),
        (None, None) => None,
    };

    let pricing = match args.pricing {
        Some(path) => load_pricing(&path)?,
        None => Vec::new(),
    };

    let content = DeckContent {
        topic: args.topic,
        body,
        pricing,
        image: args.image.map(ImageSource::Path),
    };
    let deck = compose(&plan, content).context("failed to build deck")?;

    write_atomically(&args.output, args.force, |file| {
        deck.write_to(file)?;
        Ok(())
    })?;
    log::info!("wrote {} ({} slides)", args.output.display(), deck.len());
    Ok(())
}

/// Plans from a pricing file the user named; a missing or malformed file is
/// an error, an empty one means no plans.
fn load_pricing(path: &Path) -> Result<Vec<PricingEntry>> {
    let outcome = PricingFile::new(path)
        .fetch()
        .with_context(|| format!("failed to load pricing from {}", path.display()))?;
    Ok(outcome.into_entries())
}

/// Write through a temporary file next to `path`, moving it into place only
/// once `write` succeeds.
fn write_atomically<F>(path: &Path, overwrite: bool, write: F) -> Result<()>
where
    F: FnOnce(&mut std::fs::File) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create a temporary file in {}", dir.display()))?;
    write(tmp.as_file_mut())?;
    tmp.as_file_mut().flush()?;

    let persisted = if overwrite {
        tmp.persist(path)
    } else {
        tmp.persist_noclobber(path)
    };
    persisted.with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn inspect_file(path: &Path) -> Result<()> {
    let data = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let slides = inspect(&data)
        .with_context(|| format!("{} is not a readable presentation", path.display()))?;

    println!("{}: {} slides", path.display(), slides.len());
    for slide in &slides {
        let detail = match slide.kind {
            SlideKind::BulletList => format!(" ({} bullets)", slide.bullet_count()),
            SlideKind::Chart => slide
                .chart
                .as_ref()
                .map(|chart| format!(" ({})", chart.chart_type))
                .unwrap_or_default(),
            SlideKind::Table => format!(" ({} rows)", slide.table.len().saturating_sub(1)),
            _ => String::new(),
        };
        println!("{:>3}. {:<8} {}{}", slide.index, slide.kind.to_string(), slide.title, detail);
    }
    Ok(())
}
