//! sebayt CLI: textbook PDF distillation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use sebayt::export::{self, ExportFormat};
use sebayt::extract;
use sebayt::model::{ExtractiveModel, GenerativeModel, OllamaConfig, OllamaModel, SummaryModel};
use sebayt::pipeline::{Pipeline, PipelineConfig};
use sebayt::structure::{self, StructureOutline};

#[derive(Parser)]
#[command(
    name = "sebayt",
    version,
    about = "Textbook structure inference, summarization, and example generation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write the rendered study document.
    Process {
        /// Path to the PDF file.
        pdf: PathBuf,

        /// Output format.
        #[arg(long, default_value = "markdown")]
        format: ExportFormat,

        /// Output path. Text formats default to stdout, docx to the input
        /// path with its extension swapped.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Examples requested per topic.
        #[arg(long, default_value = "2")]
        examples: usize,

        /// Use the deterministic extractive model instead of Ollama.
        #[arg(long)]
        no_llm: bool,

        /// Ollama base URL.
        #[arg(long, default_value = "http://localhost:11434")]
        ollama_url: String,

        /// Ollama model name.
        #[arg(long, default_value = "llama3.2")]
        model: String,
    },

    /// Infer the chapter/topic structure and print it as JSON.
    Structure {
        /// Path to the PDF file.
        pdf: PathBuf,
    },

    /// Show document metadata, page count, and table of contents.
    Info {
        /// Path to the PDF file.
        pdf: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            pdf,
            format,
            output,
            examples,
            no_llm,
            ollama_url,
            model,
        } => {
            let (summary_model, generative_model): (
                Box<dyn SummaryModel>,
                Box<dyn GenerativeModel>,
            ) = if no_llm {
                (Box::new(ExtractiveModel), Box::new(ExtractiveModel))
            } else {
                let config = OllamaConfig {
                    base_url: ollama_url,
                    model,
                    ..Default::default()
                };
                let ollama = OllamaModel::connect(config).into_diagnostic()?;
                (Box::new(ollama.clone()), Box::new(ollama))
            };

            let pipeline = Pipeline::new(
                summary_model,
                generative_model,
                PipelineConfig {
                    examples_per_topic: examples,
                },
            );
            let output_artifacts = pipeline.run(&pdf).into_diagnostic()?;
            let bytes = export::render(
                format,
                &output_artifacts.structure,
                &output_artifacts.summaries,
                &output_artifacts.examples,
            )
            .into_diagnostic()?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &bytes).into_diagnostic()?;
                    println!("Wrote {format} export to {}", path.display());
                }
                None if format.is_binary() => {
                    let path = pdf.with_extension(format.extension());
                    std::fs::write(&path, &bytes).into_diagnostic()?;
                    println!("Wrote {format} export to {}", path.display());
                }
                None => {
                    let rendered = String::from_utf8(bytes).into_diagnostic()?;
                    print!("{rendered}");
                }
            }
        }

        Commands::Structure { pdf } => {
            let extraction = extract::extract(&pdf).into_diagnostic()?;
            let outline = StructureOutline::from(&structure::analyze(&extraction));
            println!(
                "{}",
                serde_json::to_string_pretty(&outline).into_diagnostic()?
            );
        }

        Commands::Info { pdf } => {
            let extraction = extract::extract(&pdf).into_diagnostic()?;
            let meta = &extraction.metadata;
            println!("Title:    {}", meta.title.as_deref().unwrap_or("(none)"));
            println!("Author:   {}", meta.author.as_deref().unwrap_or("(none)"));
            println!("Subject:  {}", meta.subject.as_deref().unwrap_or("(none)"));
            if !meta.keywords.is_empty() {
                println!("Keywords: {}", meta.keywords.join(", "));
            }
            println!("Pages:    {}", meta.page_count);

            if extraction.toc.is_empty() {
                println!("TOC:      (none)");
            } else {
                println!("TOC ({} entries):", extraction.toc.len());
                for entry in &extraction.toc {
                    println!(
                        "  {}{} (p. {})",
                        "  ".repeat(entry.level.saturating_sub(1) as usize),
                        entry.title,
                        entry.page
                    );
                }
            }
        }
    }

    Ok(())
}
