mod render;

use brandwhisper_core::{Scope, SortMode};
use brandwhisper_sentiment::{AnalysisRequest, Analyzer, MAX_LIMIT};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "brandwhisper")]
#[command(about = "Summarize what Reddit thinks about a brand's products")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch posts, classify sentiment, and print a brand report
    Analyze(AnalyzeArgs),
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// Community to search (`r/` prefix optional)
    #[arg(long, default_value = "nike", conflicts_with = "all")]
    subreddit: String,

    /// Search every community instead of one subreddit
    #[arg(long)]
    all: bool,

    /// Product or topic keyword
    #[arg(long, default_value = "shoes")]
    query: String,

    /// Result ordering: relevance, hot, or new
    #[arg(long, default_value = "relevance")]
    sort: SortMode,

    /// Keep posts even when they never mention the query
    #[arg(long)]
    no_strict: bool,

    /// Maximum number of posts to analyze
    #[arg(
        long,
        default_value_t = MAX_LIMIT,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_LIMIT))
    )]
    limit: u32,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

impl AnalyzeArgs {
    fn to_request(&self) -> AnalysisRequest {
        let scope = if self.all {
            Scope::All
        } else {
            Scope::parse(&self.subreddit)
        };
        AnalysisRequest {
            sort: self.sort,
            limit: self.limit,
            strict: !self.no_strict,
            ..AnalysisRequest::new(scope, self.query.trim())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = brandwhisper_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze(args) => run_analyze(&config, &args).await,
    }
}

async fn run_analyze(
    config: &brandwhisper_core::AppConfig,
    args: &AnalyzeArgs,
) -> anyhow::Result<()> {
    let request = args.to_request();
    if request.query.is_empty() {
        anyhow::bail!("--query must not be blank");
    }

    tracing::info!(
        scope = %request.scope,
        query = %request.query,
        sort = %request.sort,
        limit = request.limit,
        strict = request.strict,
        "starting analysis"
    );

    let analyzer = Analyzer::from_config(config).await?;
    let bundle = analyzer.run(&request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        print!("{}", render::report(&bundle));
    }

    Ok(())
}
