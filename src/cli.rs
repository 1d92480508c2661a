use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docsite-search")]
#[command(about = "Search, table of contents and sidebar tools for rendered documentation pages", long_about = None)]
pub struct Cli {
    /// Config file (defaults to <config dir>/docsite-search/config.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the entries indexed from a page
    Index { page: PathBuf },
    /// Run a query against a page
    Search {
        page: PathBuf,
        query: String,
        /// Print the rendered results container markup
        #[arg(long)]
        html: bool,
    },
    /// Print the table of contents of a page
    Toc { page: PathBuf },
    /// Filter the sidebar navigation of a page
    Sidebar {
        page: PathBuf,
        #[arg(default_value = "")]
        query: String,
        /// Current page path, used to mark active items
        #[arg(short, long)]
        path: Option<String>,
    },
    /// Print the page with heading ids assigned and the table of contents installed
    Annotate {
        page: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
