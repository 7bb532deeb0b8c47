//! Lexigraph CLI
//!
//! Thin operator tool over the resolution engine: resolve a sentence,
//! show an anchor's related terms, or dump a term's graph neighborhood.
//! The surrounding CRUD backend is out of scope here; this binary talks
//! straight to the catalog database.

use clap::{Parser, Subcommand};
use lexigraph::{
    error::Result, ExtractionService, LexigraphError, LinkDirection, ResolutionEngine,
    SqliteCatalog, TermCatalog, TermExtractor, TermId,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lexigraph", version, about = "Term resolution and relation graph engine")]
struct Cli {
    /// Path to the catalog database
    #[arg(long, global = true, env = "LEXIGRAPH_DB_PATH")]
    db: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve every catalog term a sentence refers to
    Resolve {
        /// The sentence to analyze
        sentence: String,
    },

    /// Resolve a sentence to its anchor term and related terms
    Related {
        /// The sentence to analyze
        sentence: String,
    },

    /// Show the graph neighborhood of a term, by name or ID
    Connections {
        /// Term name (exact) or UUID
        term: String,
    },

    /// Ask the collaborator for study recommendations for a set of terms
    Recommendations {
        /// Term names
        terms: Vec<String>,
    },
}

/// Fallback extractor when no API key is configured: contributes no
/// candidates, leaving sentence substring seeding as the only tier
struct OfflineExtractor;

#[async_trait::async_trait]
impl TermExtractor for OfflineExtractor {
    async fn extract_terms(&self, _sentence: &str) -> Result<String> {
        Ok(String::new())
    }
}

fn default_db_path() -> String {
    PathBuf::from("lexigraph.db").to_string_lossy().to_string()
}

fn get_db_url(cli_path: Option<String>) -> String {
    let path = cli_path.unwrap_or_else(default_db_path);
    if path.starts_with("sqlite:") {
        path
    } else {
        format!("sqlite://{}", path)
    }
}

fn build_extractor() -> Arc<dyn TermExtractor> {
    match ExtractionService::with_default() {
        Ok(service) => Arc::new(service),
        Err(err) => {
            warn!("Extraction unavailable ({}), resolving without candidates", err);
            Arc::new(OfflineExtractor)
        }
    }
}

async fn resolve_term_argument(catalog: &SqliteCatalog, term: &str) -> Result<TermId> {
    if let Ok(id) = TermId::from_string(term) {
        return Ok(id);
    }

    let hits = catalog.find_by_name_exact(term).await?;
    match hits.first() {
        Some(hit) => Ok(hit.id),
        None => Err(LexigraphError::TermNotFound(term.to_string())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog = Arc::new(SqliteCatalog::new(&get_db_url(cli.db)).await?);
    catalog.run_migrations().await?;

    match cli.command {
        Command::Resolve { sentence } => {
            let engine = ResolutionEngine::new(catalog.clone(), build_extractor())
                .with_extraction_log(catalog);
            let terms = engine.resolve_terms_in_text(&sentence).await?;

            if terms.is_empty() {
                println!("No catalog terms matched.");
            }
            for term in terms {
                println!("{}  {}", term.id, term.name);
            }
        }

        Command::Related { sentence } => {
            let engine = ResolutionEngine::new(catalog.clone(), build_extractor())
                .with_extraction_log(catalog);
            let resolution = engine.resolve_and_expand(&sentence).await?;

            match resolution.anchor {
                Some(anchor) => {
                    println!("Anchor: {}", anchor.name);
                    if resolution.related.is_empty() {
                        println!("No related terms.");
                    }
                    for term in resolution.related {
                        println!("  {}", term.name);
                    }
                }
                None => println!("No anchor term found."),
            }
        }

        Command::Connections { term } => {
            let engine = ResolutionEngine::new(catalog.clone(), Arc::new(OfflineExtractor));
            let id = resolve_term_argument(&catalog, &term).await?;

            let connections = engine.connections(id).await?;
            if connections.is_empty() {
                println!("No connections.");
            }
            for connection in connections {
                let arrow = match connection.direction {
                    LinkDirection::Outgoing => "->",
                    LinkDirection::Incoming => "<-",
                };
                println!(
                    "{} [{}] {}",
                    arrow, connection.link_type, connection.term.name
                );
            }
        }

        Command::Recommendations { terms } => {
            let service = ExtractionService::with_default()?;
            let text = service.recommendations(&terms).await?;
            println!("{}", text);
        }
    }

    Ok(())
}
