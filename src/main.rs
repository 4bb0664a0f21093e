//! Page Composer CLI (for trying the engine natively)
//! The main interface is through WASM bindings.
//!
//! Set `RUST_LOG=debug` to see page commits and fit warnings from the engine.

use clap::Parser;
use page_composer::{
    Composer, ComposerConfig, DocumentImporter, JsonImporter, PlainTextImporter, Result,
    TextMetricsOracle,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-composer")]
#[command(version)]
#[command(about = "Paginate a block document into fixed-size pages", long_about = None)]
struct Args {
    /// Input document: a `.json` block list or plain text
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Font size to paginate at
    #[arg(long, value_name = "SIZE")]
    font_size: Option<f32>,

    /// Fit the font size to the configured target page count
    #[arg(long)]
    fit: bool,

    /// Composer configuration (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => ComposerConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ComposerConfig::default(),
    };
    let mut composer = Composer::new(config, TextMetricsOracle::default())?;

    let bytes = std::fs::read(&args.input)?;
    let importer: &dyn DocumentImporter =
        if args.input.extension().is_some_and(|ext| ext == "json") {
            &JsonImporter
        } else {
            &PlainTextImporter
        };
    composer.load(&bytes, importer)?;

    if let Some(size) = args.font_size {
        composer.set_font_size(size)?;
    }
    if args.fit {
        let fit = composer.auto_fit()?;
        println!(
            "auto-fit: font size {:.2} after {} runs (target met: {})",
            fit.font_size, fit.runs, fit.met_target
        );
    }
    composer.update_layout()?;

    let budget = composer.budget();
    println!(
        "{} blocks, {} words, budget {}x{}, font {} {}",
        composer.document().len(),
        composer.document().word_count(),
        budget.width,
        budget.height,
        composer.font().family,
        composer.font().size
    );

    if let Some(pagination) = composer.pagination() {
        let document = composer.document();
        for page in &pagination.pages {
            let views = page.views(document);
            let words: usize = views.iter().map(|view| view.word_count()).sum();
            let split = views.iter().filter(|view| view.is_fragment()).count();
            println!(
                "page {:>3}: {:>3} items, {:>5} words, {} fragments",
                page.index + 1,
                page.items.len(),
                words,
                split
            );
        }
        for warning in pagination.warnings() {
            let kind = document
                .block(warning.block)
                .map(|block| block.kind.name())
                .unwrap_or("unknown");
            match document.position_of(warning.block) {
                Some(position) => {
                    println!("warning: {} [{} at block {}]", warning, kind, position + 1)
                }
                None => println!("warning: {}", warning),
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(err) = run(args) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
