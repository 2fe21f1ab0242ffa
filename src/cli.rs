//! CLI parsing and orchestration. Parses args, fetches the listing, writes URLs. Maps errors to exit codes.

use crate::config::{self, Config};
use crate::listing::{fetch_all, FetchOptions, ListingClient, ListingError, Progress};
use crate::output::{write_lines, OutputError, OutputTarget};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;

/// CLI error carrying exit code and message.
#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl CliRunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliRunError::InvalidInput(_) => 1,
            CliRunError::Listing(_) => 2,
            CliRunError::Output(_) => 3,
        }
    }
}

/// Exit code for an argument parse failure: 0 for help/version output, else the invalid-input code.
pub fn parse_error_exit_code(e: &clap::Error) -> i32 {
    if e.use_stderr() {
        CliRunError::InvalidInput(String::new()).exit_code()
    } else {
        0
    }
}

#[derive(Parser, Debug)]
#[command(name = "redditurls", version)]
#[command(about = "A basic Reddit scraper to get all the urls from posts in a given subreddit")]
#[command(disable_version_flag = true)]
#[command(
    after_help = "Config file keys (base_url, timeout_secs) are read from ./redditurls.toml or the user config directory."
)]
pub struct Args {
    /// Display version.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Display version (extended).
    #[arg(long = "vv")]
    pub version_extended: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch urls from posts.
    Urls(UrlsArgs),
}

#[derive(clap::Args, Debug)]
pub struct UrlsArgs {
    /// Subreddit to scrape.
    #[arg(short, long = "sub")]
    pub sub: String,

    /// Output file. If not present (or it cannot be created), send to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Limit the number of urls to retrieve. If not present or 0, fetch everything.
    #[arg(short, long, default_value_t = 0)]
    pub limit: usize,

    /// Show extra information during the process and stats.
    #[arg(long)]
    pub verbose: bool,
}

impl Args {
    /// Whether the error source chain should be printed.
    pub fn verbose(&self) -> bool {
        matches!(&self.command, Some(Command::Urls(u)) if u.verbose)
    }
}

fn extended_version() -> String {
    format!(
        "{} {}\n{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION")
    )
}

/// Verbose progress line for one event.
fn progress_line(event: Progress<'_>) -> String {
    match event {
        Progress::Request { url } => format!("Request to: {}", url),
        Progress::Batch { count } => format!("Urls fetched in batch: {}", count),
        Progress::Finished { total } => format!("Total Urls fetched: {}", total),
    }
}

/// Load the first config file among `paths` and build the client from it.
fn build_client_from(paths: &[PathBuf]) -> Result<ListingClient, CliRunError> {
    let config = config::load_config_from(paths).map_err(CliRunError::InvalidInput)?;
    client_for(config)
}

fn build_client() -> Result<ListingClient, CliRunError> {
    let paths = config::search_paths().map_err(CliRunError::InvalidInput)?;
    build_client_from(&paths)
}

/// Config keys override the client defaults.
fn client_for(config: Option<Config>) -> Result<ListingClient, CliRunError> {
    let mut builder = ListingClient::builder();
    if let Some(c) = config {
        if let Some(base) = c.base_url {
            builder = builder.base_url(base);
        }
        if let Some(secs) = c.timeout_secs {
            builder = builder.timeout_secs(secs);
        }
    }
    Ok(builder.build()?)
}

/// Fetch the subreddit's URLs and write them to the requested target.
pub fn run_urls(args: &UrlsArgs) -> Result<(), CliRunError> {
    if args.sub.trim().is_empty() {
        return Err(CliRunError::InvalidInput(
            "Subreddit name must not be empty.".to_string(),
        ));
    }
    let mut client = build_client()?;

    let progress_cb = |event: Progress<'_>| eprintln!("{}", progress_line(event));
    let progress: Option<&dyn Fn(Progress<'_>)> = if args.verbose {
        Some(&progress_cb)
    } else {
        None
    };
    let options = FetchOptions {
        limit: args.limit,
        progress,
    };
    let urls = fetch_all(&mut client, &args.sub, &options)?;

    let mut target = OutputTarget::open(args.output.as_deref());
    write_lines(&mut target, &urls)?;
    Ok(())
}

/// Entry point for the CLI. Returns Ok(()) on success; Err with exit code and message on failure.
pub fn run(args: &Args) -> Result<(), CliRunError> {
    if args.version_extended {
        println!("{}", extended_version());
        return Ok(());
    }
    match &args.command {
        Some(Command::Urls(urls)) => run_urls(urls),
        None => {
            Args::command()
                .print_help()
                .map_err(|e| CliRunError::Output(OutputError::Write(e)))?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::PageSource;
    use std::error::Error;

    #[test]
    fn parse_urls_all_flags() {
        let args = Args::try_parse_from([
            "redditurls", "urls", "-s", "pics", "-o", "out.txt", "-l", "250", "--verbose",
        ])
        .unwrap();
        let Some(Command::Urls(u)) = args.command else {
            panic!("expected urls subcommand");
        };
        assert_eq!(u.sub, "pics");
        assert_eq!(u.output, Some(PathBuf::from("out.txt")));
        assert_eq!(u.limit, 250);
        assert!(u.verbose);
    }

    #[test]
    fn parse_urls_long_flags_and_defaults() {
        let args = Args::try_parse_from(["redditurls", "urls", "--sub", "rust"]).unwrap();
        assert!(!args.verbose());
        let Some(Command::Urls(u)) = args.command else {
            panic!("expected urls subcommand");
        };
        assert_eq!(u.sub, "rust");
        assert!(u.output.is_none());
        assert_eq!(u.limit, 0);
        assert!(!u.verbose);
    }

    #[test]
    fn parse_urls_requires_sub() {
        assert!(Args::try_parse_from(["redditurls", "urls"]).is_err());
    }

    #[test]
    fn parse_rejects_negative_limit() {
        assert!(Args::try_parse_from(["redditurls", "urls", "-s", "rust", "-l", "-5"]).is_err());
    }

    #[test]
    fn version_flags() {
        let err = Args::try_parse_from(["redditurls", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        let err = Args::try_parse_from(["redditurls", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        let args = Args::try_parse_from(["redditurls", "--vv"]).unwrap();
        assert!(args.version_extended);
    }

    #[test]
    fn help_flag() {
        let err = Args::try_parse_from(["redditurls", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn extended_version_has_name_version_and_description() {
        let text = extended_version();
        assert!(text.starts_with("redditurls "));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
        assert!(text.contains("subreddit"));
    }

    #[test]
    fn progress_lines() {
        assert_eq!(
            progress_line(Progress::Request {
                url: "https://www.reddit.com/r/rust/.json?limit=100&after="
            }),
            "Request to: https://www.reddit.com/r/rust/.json?limit=100&after="
        );
        assert_eq!(
            progress_line(Progress::Batch { count: 100 }),
            "Urls fetched in batch: 100"
        );
        assert_eq!(
            progress_line(Progress::Finished { total: 342 }),
            "Total Urls fetched: 342"
        );
    }

    #[test]
    fn empty_subreddit_is_invalid_input() {
        let args = UrlsArgs {
            sub: "  ".to_string(),
            output: None,
            limit: 0,
            verbose: false,
        };
        let err = run_urls(&args).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn missing_sub_exits_with_invalid_input_code() {
        let err = Args::try_parse_from(["redditurls", "urls"]).unwrap_err();
        assert_eq!(parse_error_exit_code(&err), 1);
        let err = Args::try_parse_from(["redditurls", "urls", "-s", "rust", "-l", "-5"]).unwrap_err();
        assert_eq!(parse_error_exit_code(&err), 1);
    }

    #[test]
    fn help_and_version_exit_zero() {
        let err = Args::try_parse_from(["redditurls", "--help"]).unwrap_err();
        assert_eq!(parse_error_exit_code(&err), 0);
        let err = Args::try_parse_from(["redditurls", "-v"]).unwrap_err();
        assert_eq!(parse_error_exit_code(&err), 0);
    }

    #[test]
    fn config_base_url_and_timeout_reach_client() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("redditurls.toml");
        std::fs::write(&path, "base_url = \"http://127.0.0.1:1/\"\ntimeout_secs = 2\n")?;
        let client = build_client_from(&[path])?;
        assert_eq!(client.base_url(), "http://127.0.0.1:1");
        Ok(())
    }

    #[test]
    fn no_config_file_uses_default_host() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let client = build_client_from(&[dir.path().join("redditurls.toml")])?;
        assert_eq!(client.base_url(), crate::listing::DEFAULT_BASE_URL);
        Ok(())
    }

    #[test]
    fn invalid_config_is_invalid_input() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("redditurls.toml");
        std::fs::write(&path, "timeout_secs = [")?;
        let err = build_client_from(&[path]).unwrap_err();
        assert!(matches!(err, CliRunError::InvalidInput(ref msg) if msg.contains("Invalid config")));
        assert_eq!(err.exit_code(), 1);
        Ok(())
    }

    #[test]
    fn listing_error_message_is_not_repeated_as_its_own_cause() {
        let err = CliRunError::from(ListingError::HttpStatus {
            status: 503,
            url: "https://www.reddit.com/r/rust/.json?limit=100&after=".into(),
        });
        assert_eq!(
            err.to_string(),
            "HTTP 503 when fetching: https://www.reddit.com/r/rust/.json?limit=100&after="
        );
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn cli_run_error_exit_codes() {
        assert_eq!(CliRunError::InvalidInput("x".into()).exit_code(), 1);
        assert_eq!(
            CliRunError::Listing(ListingError::HttpStatus {
                status: 500,
                url: "x".into()
            })
            .exit_code(),
            2
        );
        assert_eq!(
            CliRunError::Output(OutputError::Write(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "closed"
            )))
            .exit_code(),
            3
        );
    }
}
