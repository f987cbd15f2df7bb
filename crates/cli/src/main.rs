//! `assemblage` binary: build and query the semantic code index.

use anyhow::Result;
use assemblage_indexer::{IndexBuilder, IndexConfig};
use assemblage_search::{QueryEngine, SearchError, DEFAULT_TOP_K};
use assemblage_vector_store::HashEmbedder;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "assemblage", version, about = "Incremental semantic code index")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build or incrementally update the index
    Index {
        /// Project root to index
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Glob selecting tracked source files
        #[arg(long, default_value = "*.py")]
        glob: String,
    },
    /// Search the index for code matching a free-text query
    Query {
        /// Query text
        text: String,
        /// Number of results to return
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
        /// Project root whose index to search
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Index { root, glob } => {
            let config = IndexConfig::new(root).with_source_glob(glob);
            let stats = IndexBuilder::new(config, HashEmbedder::default()).build()?;
            if stats.up_to_date {
                println!("Index is up to date ({} files unchanged)", stats.files_unchanged);
            } else {
                println!(
                    "Indexed {} files ({} chunks embedded, {} vectors retired, {} files deleted)",
                    stats.files_indexed,
                    stats.chunks_embedded,
                    stats.vectors_retired,
                    stats.files_deleted
                );
            }
        }
        Command::Query { text, top_k, root } => {
            let config = IndexConfig::new(root);
            let engine = QueryEngine::new(config, HashEmbedder::default());
            match engine.search(&text, top_k) {
                Ok(hits) if hits.is_empty() => println!("No results."),
                Ok(hits) => {
                    for hit in hits {
                        println!("{:.4}  {}:{}", hit.score, hit.path, hit.line);
                        for line in hit.content.lines().take(3) {
                            println!("    {line}");
                        }
                    }
                }
                Err(SearchError::IndexNotFound) => {
                    eprintln!("Index not found. Run `assemblage index` first.");
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}
