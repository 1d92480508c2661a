mod common;

use assert2::check;
use common::page_file;
use docsite_search::commands::{
    execute_annotate, execute_index, execute_search, execute_sidebar, execute_toc,
};
use docsite_search::{Page, SiteConfig};
use rstest::rstest;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn config() -> SiteConfig {
    SiteConfig::default()
}

#[rstest]
fn index_lists_every_entry(page_file: NamedTempFile) {
    let output = execute_index(&config(), page_file.path(), false).unwrap();
    check!(output.starts_with("12 entries (5 headings)"));
    check!(output.contains("create-an-order"));
    check!(output.contains("Heading 2"));
    check!(output.contains("content-6"));
}

#[rstest]
fn index_json_is_an_array_of_entries(page_file: NamedTempFile) {
    let output = execute_index(&config(), page_file.path(), true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let entries = value.as_array().unwrap();
    check!(entries.len() == 12);
    check!(entries[0]["id"] == "orders-api");
    check!(entries[0]["kind"] == "heading");
    check!(entries[0]["level"] == 1);
    check!(entries[5]["kind"] == "content");
    check!(entries[5].get("level").is_none());
}

#[rstest]
fn search_text_output_ranks_results(page_file: NamedTempFile) {
    let output = execute_search(&config(), page_file.path(), "cancel order", false, false).unwrap();
    let lines: Vec<_> = output.lines().collect();
    check!(lines[0] == "Search results for 'cancel order':");
    check!(lines[2] == " 1. [Heading 2] Cancel an Order (#cancel-an-order, score 31)");
}

#[rstest]
#[case("x", "too short")]
#[case("zz", "No results found for 'zz'")]
fn search_text_output_distinguishes_empty_states(
    page_file: NamedTempFile,
    #[case] query: &str,
    #[case] expected: &str,
) {
    let output = execute_search(&config(), page_file.path(), query, false, false).unwrap();
    check!(output.contains(expected));
}

#[rstest]
fn search_html_renders_container(page_file: NamedTempFile) {
    let html = execute_search(&config(), page_file.path(), "decimal", false, true).unwrap();
    check!(html.contains(r#"data-target="content-4""#));
    check!(html.contains("<mark>decimal</mark>"));

    let hidden = execute_search(&config(), page_file.path(), "d", false, true).unwrap();
    check!(hidden.is_empty());
}

#[rstest]
fn search_json_reports_status(page_file: NamedTempFile) {
    let output = execute_search(&config(), page_file.path(), "errors", true, false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    check!(value["status"] == "results");
    check!(value["results"][0]["id"] == "errors");
    check!(value["results"][0]["score"] == 21);
    check!(value["results"][0]["match_count"] == 1);

    let output = execute_search(&config(), page_file.path(), " ", true, false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    check!(value["status"] == "too_short");
}

#[rstest]
fn toc_indents_by_level(page_file: NamedTempFile) {
    let output = execute_toc(&config(), page_file.path(), false).unwrap();
    check!(
        output
            == "- Create an Order (#create-an-order)\n  \
                - Parameters (#order-params)\n\
                - Cancel an Order (#cancel-an-order)\n"
    );
}

#[rstest]
fn sidebar_filters_and_marks_active(page_file: NamedTempFile) {
    let output =
        execute_sidebar(&config(), page_file.path(), "ORD", Some("/api/orders/create"), false)
            .unwrap();
    check!(output == "Section 2:\n * Orders /api/orders\n");

    let none = execute_sidebar(&config(), page_file.path(), "zzz", None, false).unwrap();
    check!(none == "No matching navigation items\n");
}

#[rstest]
fn annotate_installs_toc_and_ids(page_file: NamedTempFile) {
    let html = execute_annotate(&config(), page_file.path()).unwrap();
    let page = Page::parse(&html);

    check!(page.get_element_by_id("orders-api").unwrap().tag() == "h1");
    check!(page.get_element_by_id("errors").unwrap().tag() == "h4");
    let toc = page.get_element_by_id("tableOfContents").unwrap();
    check!(toc.text_content() == "Create an OrderParametersCancel an Order");
}

#[test]
fn annotate_keeps_page_ids_unique() {
    let mut file = tempfile::Builder::new().suffix(".html").tempfile().unwrap();
    file.write_all(
        br#"<main class="doc-content"><nav id="tableOfContents"></nav>
<article class="api-doc-article"><h4>Overview</h4><h2>Overview</h2></article></main>"#,
    )
    .unwrap();

    let html = execute_annotate(&config(), file.path()).unwrap();
    check!(html.matches(r#"id="overview""#).count() == 1);
    check!(html.matches(r#"id="overview-2""#).count() == 1);

    let page = Page::parse(&html);
    check!(page.get_element_by_id("overview").unwrap().tag() == "h2");
    check!(page.get_element_by_id("overview-2").unwrap().tag() == "h4");
    check!(html.contains(r##"<a href="#overview" class="toc-link" data-level="h2">Overview</a>"##));
}

#[test]
fn missing_page_reports_path() {
    let err = execute_index(&config(), Path::new("/no/such/page.html"), false).unwrap_err();
    check!(format!("{:#}", err).contains("/no/such/page.html"));
}
