//! Command-line interface for the issuepress binary.
//!
//! The CLI runs the issue pipeline against a site source tree, prints the
//! derived posts for inspection, or previews the slug of a single title.

use std::{io, path::PathBuf, process};

use clap::{ArgAction, Args, Parser, Subcommand};
use issuepress::{
    Error, SlugStrategy, clean_title, load_dotenv, load_site_config, run_generation, write_site,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Default site configuration file name, relative to the site source.
const DEFAULT_CONFIG_FILE: &str = "_config.yml";
const DEFAULT_LOG_FILTER: &str = "issuepress=info";

/// Command line interface for publishing GitHub issues as blog posts.
#[derive(Debug, Parser,)]
#[command(name = "issuepress", version, about = "Publish GitHub issues as static blog posts")]
struct Cli
{
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Fetch issues and write post pages and data files into the site.
    Generate(GenerateArgs,),
    /// Fetch issues and print the derived posts as JSON.
    Posts(PostsArgs,),
    /// Show the slug and clean title derived from an issue title.
    Slug(SlugArgs,),
}

/// Location of the site and its configuration.
#[derive(Debug, Args,)]
struct SiteArgs
{
    /// Site source directory (layouts and `.env` are looked up here).
    #[arg(long = "source", value_name = "DIR", default_value = ".")]
    source: PathBuf,

    /// Site configuration file; defaults to `<source>/_config.yml`.
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf,>,
}

impl SiteArgs
{
    fn config_path(&self,) -> PathBuf
    {
        self.config.clone().unwrap_or_else(|| self.source.join(DEFAULT_CONFIG_FILE,),)
    }
}

#[derive(Debug, Args,)]
struct GenerateArgs
{
    #[command(flatten)]
    site: SiteArgs,

    /// Directory receiving `posts/` and `_data/`; defaults to the source.
    #[arg(long = "output", value_name = "DIR")]
    output: Option<PathBuf,>,
}

#[derive(Debug, Args,)]
struct PostsArgs
{
    #[command(flatten)]
    site: SiteArgs,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,
}

#[derive(Debug, Args,)]
struct SlugArgs
{
    /// Issue title to derive the slug from.
    title: String,

    /// Issue number used when the title yields an empty slug.
    #[arg(long = "number", value_name = "N", default_value_t = 0)]
    number: u64,
}

/// Slug preview printed by the `slug` subcommand.
#[derive(Debug, Serialize, PartialEq, Eq,)]
struct SlugPreview
{
    slug:        String,
    clean_title: String,
    url:         String,
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main()
{
    init_tracing();

    if let Err(error,) = run() {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER,),);
    tracing_subscriber::fmt().with_env_filter(filter,).with_writer(io::stderr,).init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates configuration, runtime, and site writing errors.
fn run() -> Result<(), Error,>
{
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args,) => run_generate(&args,),
        Command::Posts(args,) => run_posts(&args,),
        Command::Slug(args,) => run_slug(&args,),
    }
}

fn run_generate(args: &GenerateArgs,) -> Result<(), Error,>
{
    let Some(data,) = generate(&args.site,)? else {
        return Ok((),);
    };

    let output = args.output.as_deref().unwrap_or(args.site.source.as_path(),);
    let report = write_site(&data, output,)?;
    info!("Published {} posts from {}", report.pages_written, data.github_issues.repository);

    Ok((),)
}

fn run_posts(args: &PostsArgs,) -> Result<(), Error,>
{
    let posts = generate(&args.site,)?.map(|data| data.issues,).unwrap_or_default();

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, &posts, args.pretty,)
}

fn run_slug(args: &SlugArgs,) -> Result<(), Error,>
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, &slug_preview(&args.title, args.number,), true,)
}

fn slug_preview(title: &str, number: u64,) -> SlugPreview
{
    let slug = SlugStrategy::builder(title,).build_or_issue(number,);
    SlugPreview {
        url: format!("/posts/{slug}/"),
        clean_title: clean_title(title,),
        slug,
    }
}

/// Loads the site configuration and runs one generation on a
/// single-threaded runtime.
fn generate(site: &SiteArgs,) -> Result<Option<issuepress::SiteData,>, Error,>
{
    load_dotenv(&site.source,);
    let config = load_site_config(&site.config_path(),)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::service(format!("failed to start async runtime: {e}"),),)?;

    runtime.block_on(run_generation(&config, &site.source, process_env,),)
}

fn process_env(name: &str,) -> Option<String,>
{
    std::env::var(name,).ok()
}

fn write_json<W: io::Write, T: Serialize + ?Sized,>(
    writer: &mut W,
    value: &T,
    pretty: bool,
) -> Result<(), Error,>
{
    if pretty {
        serde_json::to_writer_pretty(writer, value,)?;
    } else {
        serde_json::to_writer(writer, value,)?;
    }

    Ok((),)
}
