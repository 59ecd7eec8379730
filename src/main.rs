use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use devdocs_search::api::{create_router, AppState};
use devdocs_search::fuzzy::{DEFAULT_LIMIT, DEFAULT_MAX_DISTANCE};
use devdocs_search::{
    ApiKind, Corpus, PlatformFilter, SearchEngine, SearchFilters, SearchHit, SearchOptions,
    SearchType, ValidationConfig,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "In-memory API documentation search", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct CorpusArgs {
    /// Extractor output as JSON (`.json` or `.json.gz`)
    #[arg(short, long, default_value = "corpus.json")]
    corpus: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve search over HTTP
    Serve {
        #[command(flatten)]
        corpus: CorpusArgs,

        #[arg(short, long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,

        /// Minimum number of API records for the index to be considered valid
        #[arg(long, default_value_t = 50)]
        min_apis: usize,

        /// Serve even when validation reports errors
        #[arg(long)]
        allow_invalid: bool,
    },
    /// Run a single ranked query
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,

        query: String,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// api, guide or all
        #[arg(short = 't', long = "type", default_value = "all")]
        search_type: SearchType,

        #[arg(long)]
        category: Option<String>,

        /// method or property
        #[arg(long)]
        kind: Option<ApiKind>,

        /// ios, android or both
        #[arg(long)]
        platform: Option<PlatformFilter>,
    },
    /// Resolve a possibly misspelled API name
    Similar {
        #[command(flatten)]
        corpus: CorpusArgs,

        name: String,

        #[arg(long, default_value_t = DEFAULT_MAX_DISTANCE)]
        max_distance: usize,

        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Print index statistics as JSON
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
    /// Run the startup diagnostics and exit non-zero on errors
    Validate {
        #[command(flatten)]
        corpus: CorpusArgs,

        #[arg(long, default_value_t = 50)]
        min_apis: usize,
    },
}

fn load_engine(args: &CorpusArgs) -> Result<SearchEngine> {
    let corpus = Corpus::load(&args.corpus)?;
    Ok(SearchEngine::from_corpus(corpus))
}

fn validation_config(min_apis: usize) -> ValidationConfig {
    ValidationConfig {
        min_api_count: min_apis,
        ..Default::default()
    }
}

async fn serve(
    corpus: CorpusArgs,
    addr: SocketAddr,
    min_apis: usize,
    allow_invalid: bool,
) -> Result<()> {
    let engine = load_engine(&corpus)?;

    let validation = validation_config(min_apis);
    let report = engine.validate(&validation);
    report.log();
    if !allow_invalid {
        report.into_result()?;
    }

    let state = AppState::new(engine)
        .with_corpus_path(corpus.corpus)
        .with_validation(validation);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn do_search(engine: &SearchEngine, query: &str, options: &SearchOptions) {
    let results = engine.search(query, options);
    if results.is_empty() {
        println!("No results for \"{}\"", query);
        return;
    }

    for (i, result) in results.iter().enumerate() {
        match &result.hit {
            SearchHit::Api(api) => {
                println!("{}. [{:>3}] {} ({})", i + 1, result.score, api.name, api.category);
                if !api.signature.is_empty() {
                    println!("      {}", api.signature);
                }
            }
            SearchHit::Documentation(chunk) => {
                println!("{}. [{:>3}] {} ({})", i + 1, result.score, chunk.title, chunk.source);
            }
        }
        for highlight in &result.highlights {
            println!("      {}: {}", highlight.field, highlight.text);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("devdocs_search=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            corpus,
            addr,
            min_apis,
            allow_invalid,
        } => serve(corpus, addr, min_apis, allow_invalid).await?,
        Command::Search {
            corpus,
            query,
            limit,
            search_type,
            category,
            kind,
            platform,
        } => {
            let engine = load_engine(&corpus)?;
            let options = SearchOptions {
                limit,
                filters: SearchFilters {
                    search_type,
                    category,
                    kind,
                    platform,
                },
            };
            do_search(&engine, &query, &options);
        }
        Command::Similar {
            corpus,
            name,
            max_distance,
            limit,
        } => {
            let engine = load_engine(&corpus)?;
            let matches = engine.find_similar(&name, max_distance, limit);
            if matches.is_empty() {
                println!("No API names close to \"{}\"", name);
            }
            for api in matches {
                println!("{}\t{}", api.name, api.signature);
            }
        }
        Command::Stats { corpus } => {
            let engine = load_engine(&corpus)?;
            println!("{}", serde_json::to_string_pretty(&engine.stats())?);
        }
        Command::Validate { corpus, min_apis } => {
            let engine = load_engine(&corpus)?;
            let report = engine.validate(&validation_config(min_apis));
            report.log();
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.is_valid() {
                bail!("{} validation error(s)", report.errors.len());
            }
        }
    }

    Ok(())
}
