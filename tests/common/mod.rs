//! Shared test fixtures for integration tests.
//!
//! # Available Fixtures
//!
//! - `docs_page`: a parsed copy of [`DOCS_PAGE`]
//! - `page_file`: [`DOCS_PAGE`] written to a temporary `.html` file, for command tests

use docsite_search::Page;
use rstest::fixture;
use std::io::Write;
use tempfile::NamedTempFile;

/// A documentation page shaped like the stock theme: sidebar, article, TOC container.
pub const DOCS_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Orders API</title></head>
<body>
<aside class="sidebar">
  <div class="nav-section">
    <a class="nav-item" href="/guides/getting-started">Getting Started</a>
    <a class="nav-item" href="/guides/authentication">Authentication</a>
  </div>
  <div class="nav-section">
    <a class="nav-item" href="/api/orders">Orders</a>
    <a class="nav-item" href="/api/accounts">Accounts</a>
  </div>
</aside>
<input id="search-input">
<div id="search-results"></div>
<main class="doc-content">
  <nav id="tableOfContents"></nav>
  <article class="api-doc-article">
    <h1>Orders API</h1>
    <p>The Orders API lets you place, inspect and cancel orders.</p>
    <h2>Create an Order</h2>
    <p>Send a POST request to create an order.</p>
    <ul>
      <li>Market orders fill immediately.</li>
      <li>Limit orders rest on the book.</li>
    </ul>
    <h3 id="order-params">Parameters</h3>
    <p>All prices are decimal strings.</p>
    <h2>Cancel an Order</h2>
    <p>Orders can be cancelled until they are filled.</p>
    <h4>Errors</h4>
    <p>Cancelling a filled order returns an error.</p>
  </article>
</main>
</body>
</html>"#;

#[fixture]
#[allow(dead_code)] // Used across different integration test crates
pub fn docs_page() -> Page {
    Page::parse(DOCS_PAGE)
}

#[fixture]
#[allow(dead_code)] // Used across different integration test crates
pub fn page_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".html")
        .tempfile()
        .expect("create temp page");
    file.write_all(DOCS_PAGE.as_bytes()).expect("write temp page");
    file
}

/// Ids of the results of a query, in ranked order.
#[allow(dead_code)] // Used across different integration test crates
pub fn result_ids(outcome: &docsite_search::SearchOutcome<'_>) -> Vec<String> {
    outcome
        .results()
        .iter()
        .map(|r| r.entry.id.clone())
        .collect()
}
