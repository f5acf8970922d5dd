mod build;
mod consts;
mod logging;
mod serve;
mod server_utils;

use std::path::PathBuf;

use build::build_site;
use clap::{Parser, Subcommand};
use logging::init_logging;
use serve::start_static_server;
use tracing::error;
use vitrine::{DirFetcher, HttpFetcher};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Don't print anything
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the pages of a site directory from its JSON content
    Build {
        /// Directory containing projects.json, articles.json and translations.json
        #[arg(long, default_value = ".")]
        site: PathBuf,

        /// Language to render, saved for the next builds
        #[arg(long)]
        lang: Option<String>,

        /// Directory to write the pages to, defaults to the site directory
        #[arg(long)]
        out: Option<PathBuf>,

        /// Fetch the JSON content from a running server (e.g. http://localhost:3000) instead of the site directory
        #[arg(long)]
        content_url: Option<String>,
    },
    /// Serve a directory over HTTP
    Serve {
        /// Directory to serve
        #[arg(long, default_value = ".")]
        root: PathBuf,

        #[arg(long, default_value_t = consts::PORT)]
        port: u16,

        /// Listen on all interfaces instead of localhost only
        #[arg(long)]
        host: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging();
    }

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Commands::Build {
            site,
            lang,
            out,
            content_url,
        } => {
            let pages = match content_url {
                Some(url) => build_site(&site, HttpFetcher::new(url), lang.as_deref(), out).await,
                None => build_site(&site, DirFetcher::new(&site), lang.as_deref(), out).await,
            };
            pages.map(|_| ()).map_err(Into::into)
        }
        Commands::Serve { root, port, host } => start_static_server(root, port, host).await,
    };

    if let Err(err) = result {
        error!(name: "vitrine", "{}", err);
        std::process::exit(1);
    }
}
