use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use beir_fess::cli::{self, Overrides};
use beir_fess::{logging, IndicatifProgress, Settings};
use beir_fess_repository::FessSearch;
use beir_fess_shared::{load_corpus, load_queries, write_trec_run};

#[derive(Parser)]
#[command(name = "beir-fess")]
#[command(about = "Run BEIR retrieval against a Fess server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    overrides: Overrides,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete every document in the index
    Reset,
    /// Upload a BEIR corpus
    Index {
        /// Path to corpus.jsonl
        #[arg(long)]
        corpus: PathBuf,
    },
    /// Retrieve top-k documents for every query and write a TREC run
    Search {
        /// Path to corpus.jsonl (required unless --no-initialize)
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Path to queries.jsonl
        #[arg(long)]
        queries: PathBuf,

        /// Number of documents to retrieve per query
        #[arg(long, default_value = "100")]
        top_k: usize,

        /// Run file path (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Run name written in the last column
        #[arg(long, default_value = "fess")]
        run_name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init_tracing();

    let cli = Cli::parse();

    let mut settings = Settings::from_env()?;
    cli.overrides.apply(&mut settings);
    let progress = Arc::new(if cli.overrides.quiet {
        IndicatifProgress::hidden()
    } else {
        IndicatifProgress::new()
    });

    match cli.command {
        Commands::Reset => {
            let config = settings.to_search_config().with_initialize(false);
            FessSearch::connect(config).await?.reset().await?;
            info!("Index cleared");
        }
        Commands::Index { corpus } => {
            let corpus = load_corpus(corpus)?;
            let adapter = FessSearch::connect(settings.to_search_config())
                .await?
                .with_progress(progress);
            let uploaded = adapter.ingest(&corpus).await?;
            info!(uploaded = uploaded, "Index finished");
        }
        Commands::Search {
            corpus,
            queries,
            top_k,
            output,
            run_name,
        } => {
            let corpus = match cli::search_corpus(corpus, &settings)? {
                Some(path) => load_corpus(path)?,
                None => Default::default(),
            };
            let queries = load_queries(queries)?;

            let adapter = FessSearch::connect(settings.to_search_config())
                .await?
                .with_progress(progress);
            let results = adapter.search(&corpus, &queries, top_k).await?;

            let lines = match output {
                Some(path) => {
                    let writer = BufWriter::new(File::create(&path)?);
                    write_trec_run(&results, &run_name, writer)?
                }
                None => write_trec_run(&results, &run_name, io::stdout().lock())?,
            };
            info!(queries = results.len(), lines = lines, "Wrote run");
        }
    }

    Ok(())
}
