use anyhow::Context as _;
use clap::Parser;
use docsite_search::cli::{Cli, Commands};
use docsite_search::commands::{
    execute_annotate, execute_index, execute_search, execute_sidebar, execute_toc,
};
use docsite_search::config::SiteConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    docsite_search::tracing::init(cli.verbose);

    let config = SiteConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let output = match &cli.command {
        Commands::Index { page } => execute_index(&config, page, cli.json)?,
        Commands::Search { page, query, html } => {
            execute_search(&config, page, query, cli.json, *html)?
        }
        Commands::Toc { page } => execute_toc(&config, page, cli.json)?,
        Commands::Sidebar { page, query, path } => {
            execute_sidebar(&config, page, query, path.as_deref(), cli.json)?
        }
        Commands::Annotate { page, output } => {
            let html = execute_annotate(&config, page)?;
            if let Some(output) = output {
                std::fs::write(output, html)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                tracing::info!("Wrote {}", output.display());
                return Ok(());
            }
            html
        }
    };

    print!("{}", output);
    Ok(())
}
