//! spacenews CLI
//!
//! Browse articles, blogs and reports from the Spaceflight News API.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use spacenews::{
    api::ApiClient,
    error::Result,
    models::{Config, Resource, SearchParams},
    pages::{self, ViewStatus},
    routes::Route,
    services::NewsService,
};

/// spacenews - Spaceflight News reader
#[derive(Parser, Debug)]
#[command(name = "spacenews", version, about = "Spaceflight News reader")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "spacenews.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List articles
    Articles(PageArgs),
    /// List blog posts
    Blogs(PageArgs),
    /// List reports
    Reports(PageArgs),

    /// Show one article
    Article { id: String },
    /// Show one blog post
    Blog { id: String },
    /// Show one report
    Report { id: String },

    /// Open a route such as "/articles?page=2" or "/blogs/1234"
    Open {
        #[arg(default_value = "/")]
        route: String,
    },

    /// Load several pages back to back
    Feed {
        resource: Resource,
        /// Items per page (default: pagination.default_limit)
        #[arg(long)]
        limit: Option<u32>,
        /// Stop after this many pages
        #[arg(long, default_value_t = 5)]
        max_pages: usize,
    },

    /// Validate configuration
    Validate,

    /// Show effective configuration
    Info,
}

#[derive(clap::Args, Debug)]
struct PageArgs {
    /// Page number, starting at 1
    #[arg(short, long)]
    page: Option<u32>,

    /// Items per page
    #[arg(short, long)]
    limit: Option<u32>,
}

impl PageArgs {
    fn into_route(self, resource: Resource) -> Route {
        let mut search = SearchParams::new();
        if let Some(page) = self.page {
            search.set("page", page.to_string());
        }
        if let Some(limit) = self.limit {
            search.set("limit", limit.to_string());
        }
        Route::List { resource, search }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config).with_env_overrides();

    let route = match cli.command {
        Command::Articles(args) => args.into_route(Resource::Articles),
        Command::Blogs(args) => args.into_route(Resource::Blogs),
        Command::Reports(args) => args.into_route(Resource::Reports),
        Command::Article { id } => Route::detail(Resource::Articles, id),
        Command::Blog { id } => Route::detail(Resource::Blogs, id),
        Command::Report { id } => Route::detail(Resource::Reports, id),
        Command::Open { route } => Route::parse(&route)?,

        Command::Feed {
            resource,
            limit,
            max_pages,
        } => {
            config.validate()?;
            let news = build_service(&config)?;
            let limit = limit.unwrap_or(news.pagination().default_limit);
            let mut out = io::stdout().lock();
            let status =
                pages::run_feed(&config, &news, resource, limit, max_pages, &mut out).await?;
            out.flush()?;
            return Ok(exit_code(status));
        }

        Command::Validate => {
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            println!("✓ Config OK ({})", config.api.base_url);
            return Ok(ExitCode::SUCCESS);
        }

        Command::Info => {
            println!("Config file: {}", cli.config.display());
            println!("API: {}", config.api.base_url);
            println!(
                "Access token: {}",
                if config.api.access_token.is_some() {
                    "set"
                } else {
                    "not set"
                }
            );
            println!(
                "Default page/limit: {}/{}",
                config.pagination.default_page, config.pagination.default_limit
            );
            println!(
                "Cache: {} entries, stale after {}s, retry {}x",
                config.query.capacity, config.query.stale_time_secs, config.query.retry
            );
            return Ok(ExitCode::SUCCESS);
        }
    };

    config.validate()?;
    let news = build_service(&config)?;

    let mut out = io::stdout().lock();
    let status = pages::run_route(&config, &news, &route, &mut out).await?;
    out.flush()?;

    Ok(exit_code(status))
}

fn build_service(config: &Config) -> Result<NewsService> {
    let client = ApiClient::new(&config.api)?;
    log::debug!("Using API at {}", client.base_url());
    Ok(NewsService::new(Arc::new(client), config))
}

fn exit_code(status: ViewStatus) -> ExitCode {
    if status.is_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
