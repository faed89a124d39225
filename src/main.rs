use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use taproot::config::{Config, ExtractorBackend};
use taproot::download;
use taproot::expand::TopicExpander;
use taproot::finder::{NoTopicCandidates, TopicFinder};
use taproot::keywords::{EmbeddingKeywordExtractor, KeywordExtractor, TfIdfKeywordExtractor};
use taproot::output;
use taproot::wordnet::WordNetGraph;
use taproot::zeroshot::OnnxNliScorer;

/// Taproot: unsupervised topic labeling for free text.
///
/// Extracts keywords with a sentence embedding model, expands them into
/// broader terms through WordNet, and picks the best-fitting labels with a
/// zero-shot classifier.
#[derive(Parser)]
#[command(name = "taproot", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer topic labels for a passage of text
    Topics {
        /// The text to label (or use --file)
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(long)]
        file: Option<PathBuf>,

        /// Maximum number of topics to return
        #[arg(long, default_value = "2")]
        n_topic: usize,

        /// Print the full pipeline trace as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the pipeline on a built-in sample passage
    Demo,

    /// Download the ONNX models (~480 MB total)
    DownloadModel,

    /// Show which models and WordNet files are present
    Status,
}

/// The sample passage for `taproot demo`.
const DEMO_TEXT: &str = "Dinosaurs are a varied group of animals from taxonomic, morphological \
and ecological standpoints. Birds, at over 10,700 living species, are among the most diverse \
group of vertebrates. Using fossil evidence, paleontologists have identified over 900 distinct \
genera and more than 1,000 different species of non-avian dinosaurs. Dinosaurs are represented \
on every continent by both extant species (birds) and fossil remains. Through the first half of \
the 20th century, before birds were recognized as dinosaurs, most of the scientific community \
believed dinosaurs to have been sluggish and cold-blooded. Most research conducted since the \
1970s, however, has indicated that dinosaurs were active animals with elevated metabolisms and \
numerous adaptations for social interaction. Some were herbivorous, others carnivorous. \
Evidence suggests that all dinosaurs were egg-laying; and that nest-building was a trait shared \
by many dinosaurs, both avian and non-avian.";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("taproot=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Topics {
            text,
            file,
            n_topic,
            json,
        } => {
            let input = match (text, file) {
                (Some(t), None) => t,
                (None, Some(path)) => std::fs::read_to_string(&path).map_err(|e| {
                    anyhow::anyhow!("Failed to read {}: {}", path.display(), e)
                })?,
                (Some(_), Some(_)) => {
                    anyhow::bail!("Pass the text as an argument or via --file, not both")
                }
                (None, None) => anyhow::bail!("Nothing to label: pass text or --file"),
            };

            let config = Config::load()?;
            let finder = build_finder(&config)?;

            if json {
                match finder.trace(&input, n_topic).await {
                    Ok(trace) => println!("{}", serde_json::to_string_pretty(&trace)?),
                    Err(e) => return report_undetermined(e),
                }
            } else {
                println!(
                    "Inferring topics for: {}",
                    output::truncate_chars(&input, 80).dimmed()
                );
                match finder.find_topic(&input, n_topic).await {
                    Ok(topics) => output::display_topics(&topics),
                    Err(e) => return report_undetermined(e),
                }
            }
        }

        Commands::Demo => {
            let config = Config::load()?;
            let finder = build_finder(&config)?;

            println!("Sample passage: {}", output::truncate_chars(DEMO_TEXT, 80).dimmed());
            let topics = finder.find_topic(DEMO_TEXT, 1).await?;
            output::display_topics(&topics);
        }

        Commands::DownloadModel => {
            let config = Config::load()?;

            println!("Downloading ONNX models...");
            println!("  Destination: {}", config.model_dir.display());

            download::download_models(&config.model_dir, &config.model).await?;

            println!("\n{}", "Models downloaded successfully.".bold());
            println!("You can now run `taproot demo` or `taproot topics \"...\"`.");
        }

        Commands::Status => {
            let config = Config::load()?;
            show_status(&config);
        }
    }

    Ok(())
}

/// Construct the pipeline from configuration: WordNet graph, keyword
/// extractor backend, and zero-shot scorer, all validated up front.
fn build_finder(config: &Config) -> Result<TopicFinder> {
    config.require_wordnet()?;
    config.require_models()?;

    let graph = Arc::new(WordNetGraph::load(&config.wordnet_dir)?);
    let mut expander = TopicExpander::new(graph);
    expander.max_senses_per_keyword = config.max_senses_per_keyword;
    expander.generalization_depth = config.generalization_depth;

    let extractor: Arc<dyn KeywordExtractor> = match config.extractor_backend {
        ExtractorBackend::Embedding => {
            let dir = download::embedding_model_dir(&config.model_dir, &config.model);
            Arc::new(EmbeddingKeywordExtractor::load(&dir, config.num_keywords)?)
        }
        ExtractorBackend::TfIdf => {
            info!("Using TF-IDF keyword extraction");
            Arc::new(TfIdfKeywordExtractor {
                num_keywords: config.num_keywords,
            })
        }
    };

    let scorer = Arc::new(OnnxNliScorer::load(&download::nli_model_dir(
        &config.model_dir,
    ))?);

    Ok(TopicFinder::new(extractor, expander, scorer))
}

/// An empty candidate set means "topic undetermined", not a crash — print
/// that and exit cleanly. Anything else propagates.
fn report_undetermined(e: anyhow::Error) -> Result<()> {
    if e.downcast_ref::<NoTopicCandidates>().is_some() {
        println!(
            "{}",
            "Topic undetermined — no topic candidates found for this text.".yellow()
        );
        return Ok(());
    }
    Err(e)
}

/// Display which pieces of the pipeline are ready to run.
fn show_status(config: &Config) {
    let embedding = download::embedding_files_present(&config.model_dir, &config.model);
    let nli = download::nli_files_present(&config.model_dir);
    let wordnet = WordNetGraph::files_present(&config.wordnet_dir);

    let mark = |present: bool| if present { "ok".green() } else { "missing".red() };

    println!("Model directory: {}", config.model_dir.display());
    println!("  Embedding model ({}): {}", config.model, mark(embedding));
    println!("  NLI model (bart-large-mnli): {}", mark(nli));
    println!("WordNet directory: {}", config.wordnet_dir.display());
    println!("  Database files: {}", mark(wordnet));

    if !embedding || !nli {
        println!("\nRun `taproot download-model` to fetch the missing models.");
    }
    if !wordnet {
        println!(
            "Download WNdb from https://wordnetcode.princeton.edu/3.0/WNdb-3.0.tar.gz and\n\
             extract it into the WordNet directory (or set TAPROOT_WORDNET_DIR)."
        );
    }
}
