//! souq-admin CLI
//!
//! Renders admin screens from marketplace API responses.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use souq_admin::{index_view, render_resource, AdminSite, ListViewParams, Resource};

/// Admin screens for the souq classifieds marketplace.
#[derive(Parser)]
#[command(name = "souq-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Site title shown in the sidebar.
    #[arg(long, env = "SOUQ_ADMIN_NAME", default_value = "Souq Admin")]
    site_name: String,

    /// URL prefix of the admin pages.
    #[arg(long, env = "SOUQ_ADMIN_PREFIX", default_value = "/admin")]
    url_prefix: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a list screen from an API response.
    Render {
        /// Screen to render (users, categories, category-features, advertisings).
        resource: Resource,

        /// JSON response body (stdin if not specified).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Raw query string, e.g. "?page=2&q=ali&o=-name".
        #[arg(long, default_value = "")]
        query: String,

        /// Search query.
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Sort column, prefix with - for descending.
        #[arg(short, long, allow_hyphen_values = true)]
        ordering: Option<String>,

        /// Page number.
        #[arg(short, long)]
        page: Option<usize>,

        /// Rows per page.
        #[arg(long)]
        per_page: Option<usize>,

        /// Columns to flip from their default visibility.
        #[arg(short, long, value_delimiter = ',')]
        toggle: Vec<String>,

        /// Output file (stdout if not specified).
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Render the dashboard.
    Index {
        /// Output file (stdout if not specified).
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

fn write_output(output: Option<&Path>, html: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, html)?;
            info!("Wrote {}", path.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let site = AdminSite::new(cli.site_name).url_prefix(cli.url_prefix);

    match cli.command {
        Commands::Render {
            resource,
            input,
            query,
            search,
            ordering,
            page,
            per_page,
            toggle,
            output,
        } => {
            let mut params = ListViewParams::parse(&query);
            if let Some(search) = search {
                params.search = Some(search).filter(|s| !s.trim().is_empty());
            }
            if ordering.is_some() {
                params.ordering = ordering;
            }
            if let Some(page) = page {
                params.page = page.max(1);
            }
            if per_page.is_some() {
                params.per_page = per_page.filter(|n| *n > 0);
            }
            params.toggled.extend(toggle);
            debug!(?params, "list parameters");

            let body = read_input(input.as_deref())?;
            info!("Rendering {} screen", resource);
            let html = render_resource(&site, resource, &body, &params)?;
            write_output(output.as_deref(), &html)?;
        }

        Commands::Index { output } => {
            write_output(output.as_deref(), &index_view(&site))?;
        }
    }

    Ok(())
}
