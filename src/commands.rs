//! Command implementations behind the CLI. Each returns the text to print.

use crate::config::SiteConfig;
use crate::error::Result;
use crate::page::Page;
use crate::search::{QueryEngine, SearchOutcome, build_index, render_results, type_label};
use crate::sidebar::Sidebar;
use crate::toc::TableOfContents;
use anyhow::Context as _;
use serde_json::json;
use std::fmt::Write as _;
use std::path::Path;

fn load_page(path: &Path) -> Result<Page> {
    Page::load(path).with_context(|| format!("Could not open page {}", path.display()))
}

/// List indexed entries.
pub fn execute_index(config: &SiteConfig, page_path: &Path, as_json: bool) -> Result<String> {
    let page = load_page(page_path)?;
    let index = build_index(&page, &config.search);

    if as_json {
        return Ok(serde_json::to_string_pretty(&index)?);
    }

    if index.is_empty() {
        return Ok(format!(
            "No indexable content found in '{}' of {}.\n",
            config.search.content_selector,
            page_path.display()
        ));
    }

    let mut output = format!(
        "{} entries ({} headings) in {}:\n\n",
        index.len(),
        index.heading_count(),
        page_path.display()
    );
    for entry in index.entries() {
        writeln!(output, "{:<24} {:<10} {}", entry.id, type_label(entry), entry.text)?;
    }
    Ok(output)
}

/// Run a query and print ranked results, the rendered container, or JSON.
pub fn execute_search(
    config: &SiteConfig,
    page_path: &Path,
    query: &str,
    as_json: bool,
    as_html: bool,
) -> Result<String> {
    let page = load_page(page_path)?;
    let index = build_index(&page, &config.search);
    let engine = QueryEngine::new(config.search.clone());
    let outcome = engine.search(&index, query);

    if as_json {
        return Ok(serde_json::to_string_pretty(&outcome)?);
    }
    if as_html {
        return Ok(render_results(&outcome, query).unwrap_or_default());
    }

    let results = match &outcome {
        SearchOutcome::TooShort => {
            return Ok(format!(
                "Query '{}' is too short (minimum {} characters).\n",
                query.trim(),
                config.search.min_query_chars
            ));
        }
        SearchOutcome::Results(results) if results.is_empty() => {
            return Ok(format!("No results found for '{}'.\n", query.trim()));
        }
        SearchOutcome::Results(results) => results,
    };

    let mut output = format!("Search results for '{}':\n\n", query.trim());
    for (rank, result) in results.iter().enumerate() {
        writeln!(
            output,
            "{:>2}. [{}] {} (#{}, score {})",
            rank + 1,
            type_label(result.entry),
            result.entry.text,
            result.entry.id,
            result.score
        )?;
    }
    Ok(output)
}

pub fn execute_toc(config: &SiteConfig, page_path: &Path, as_json: bool) -> Result<String> {
    let page = load_page(page_path)?;
    let toc = TableOfContents::build(&page, &config.toc);

    if as_json {
        return Ok(serde_json::to_string_pretty(toc.entries())?);
    }
    if toc.is_empty() {
        return Ok("No headings found\n".to_string());
    }

    let min_level = toc.entries().iter().map(|e| e.level).min().unwrap_or(1);
    let mut output = String::new();
    for entry in toc.entries() {
        let indent = "  ".repeat(usize::from(entry.level - min_level));
        writeln!(output, "{}- {} (#{})", indent, entry.text, entry.id)?;
    }
    Ok(output)
}

pub fn execute_sidebar(
    config: &SiteConfig,
    page_path: &Path,
    query: &str,
    current_path: Option<&str>,
    as_json: bool,
) -> Result<String> {
    let page = load_page(page_path)?;
    let sidebar = Sidebar::from_page(&page, &config.sidebar);
    let view = sidebar.filter(query);
    let active: Vec<_> = current_path
        .map(|path| sidebar.active_items(path).collect())
        .unwrap_or_default();

    if as_json {
        let value = json!({ "sections": view, "active": active });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let mut output = String::new();
    for (i, section) in view.iter().enumerate().filter(|(_, s)| s.visible) {
        writeln!(output, "Section {}:", i + 1)?;
        for item in section.items.iter().filter(|i| i.visible) {
            let marker = if active.contains(&item.item) { "*" } else { " " };
            writeln!(
                output,
                " {} {} {}",
                marker,
                item.item.label,
                item.item.href.as_deref().unwrap_or("")
            )?;
        }
    }
    if output.is_empty() {
        output.push_str("No matching navigation items\n");
    }
    Ok(output)
}

/// Assign heading ids, install the table of contents and return the page HTML.
pub fn execute_annotate(config: &SiteConfig, page_path: &Path) -> Result<String> {
    let page = load_page(page_path)?;
    let toc = TableOfContents::build(&page, &config.toc);
    if !toc.install(&page, &config.toc.container_id) {
        tracing::warn!(
            "Page has no #{} container; table of contents not installed",
            config.toc.container_id
        );
    }
    // Indexing writes slugs onto the remaining searchable headings.
    let index = build_index(&page, &config.search);
    tracing::info!("Annotated {} ({} index entries)", page_path.display(), index.len());

    Ok(page.to_html()?)
}
