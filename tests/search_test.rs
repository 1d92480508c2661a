mod common;

use assert2::check;
use common::{DOCS_PAGE, docs_page, result_ids};
use docsite_search::config::SearchSettings;
use docsite_search::search::{normalize_query, query_tokens};
use docsite_search::{
    EntryKind, IndexEntry, Page, QueryEngine, SearchIndex, SearchOutcome, SearchSurface,
    SurfaceState, build_index, search,
};
use rstest::rstest;
use std::time::{Duration, Instant};

fn index_of(page: &Page) -> SearchIndex {
    build_index(page, &SearchSettings::default())
}

// --- Index construction ---

#[rstest]
fn index_lists_headings_then_content(docs_page: Page) {
    let index = index_of(&docs_page);
    let ids: Vec<_> = index.entries().iter().map(|e| e.id.as_str()).collect();
    check!(
        ids == [
            "orders-api",
            "create-an-order",
            "order-params",
            "cancel-an-order",
            "errors",
            "content-0",
            "content-1",
            "content-2",
            "content-3",
            "content-4",
            "content-5",
            "content-6",
        ]
    );

    let levels: Vec<_> = index
        .entries()
        .iter()
        .filter(|e| e.kind == EntryKind::Heading)
        .map(|e| e.level.unwrap())
        .collect();
    check!(levels == [1, 2, 3, 2, 4]);
    check!(index.entries()[5..].iter().all(|e| e.level.is_none()));
}

#[rstest]
fn index_ids_are_unique(docs_page: Page) {
    let index = index_of(&docs_page);
    let mut ids: Vec<_> = index.entries().iter().map(|e| e.id.clone()).collect();
    ids.sort();
    ids.dedup();
    check!(ids.len() == index.len());
}

/// Building twice, on the same page or on a fresh parse of it, gives the same entries per id.
#[test]
fn index_build_is_idempotent() {
    let page = Page::parse(DOCS_PAGE);
    let first = index_of(&page);
    let again = index_of(&page);
    let fresh = index_of(&Page::parse(DOCS_PAGE));

    for entry in first.entries() {
        for other in [&again, &fresh] {
            let same = other.get(&entry.id).unwrap();
            check!(same.text == entry.text);
            check!(same.kind == entry.kind);
            check!(same.level == entry.level);
        }
    }
}

#[test]
fn page_without_article_has_empty_index() {
    let page = Page::parse("<html><body><h1>Loose heading</h1><p>Loose text</p></body></html>");
    let index = index_of(&page);
    check!(index.is_empty());
    check!(search(&index, "loose") == SearchOutcome::Results(vec![]));
}

// --- Queries ---

#[test]
fn getting_started_scenario() {
    let index = SearchIndex::from_entries(vec![
        IndexEntry::heading("h1", 1, "Getting Started"),
        IndexEntry::content("content-0", "This guide helps you get started quickly."),
    ]);
    let outcome = search(&index, "started");
    check!(result_ids(&outcome) == ["h1", "content-0"]);
    let scores: Vec<_> = outcome.results().iter().map(|r| r.score).collect();
    check!(scores == [17, 7]);
}

#[rstest]
#[case("order", &["orders-api", "create-an-order", "cancel-an-order", "content-0", "content-1", "content-2", "content-3", "content-5", "content-6"])]
#[case("cancel order", &["cancel-an-order", "orders-api", "create-an-order", "content-0", "content-5", "content-6", "content-1", "content-2", "content-3"])]
#[case("ERRORS", &["errors"])]
#[case("decimal strings", &["content-4"])]
fn ranked_results(docs_page: Page, #[case] query: &str, #[case] expected: &[&str]) {
    let index = index_of(&docs_page);
    check!(result_ids(&search(&index, query)) == expected);
}

#[rstest]
#[case("")]
#[case(" ")]
#[case("o")]
#[case("\t x \n")]
fn short_queries_signal_too_short(docs_page: Page, #[case] query: &str) {
    let index = index_of(&docs_page);
    check!(search(&index, query).is_too_short());
}

#[rstest]
fn unmatched_query_is_empty_not_too_short(docs_page: Page) {
    let index = index_of(&docs_page);
    let outcome = search(&index, "xy");
    check!(!outcome.is_too_short());
    check!(outcome.results().is_empty());
}

#[rstest]
#[case("order")]
#[case("cancel order")]
#[case("an or")]
#[case("the book")]
fn results_are_sorted_and_justified(docs_page: Page, #[case] query: &str) {
    let index = index_of(&docs_page);
    let outcome = search(&index, query);
    let results = outcome.results();
    let normalized = normalize_query(query);
    let tokens = query_tokens(&normalized);

    for pair in results.windows(2) {
        check!(pair[0].score >= pair[1].score);
        if pair[0].score == pair[1].score {
            let position = |id: &str| index.entries().iter().position(|e| e.id == id);
            check!(position(&pair[0].entry.id) < position(&pair[1].entry.id));
        }
    }
    for result in results {
        let text = result.entry.text.to_lowercase();
        let matched = tokens.iter().filter(|t| text.contains(**t)).count();
        check!(result.match_count >= 1);
        check!(usize::try_from(result.match_count).unwrap() == matched);
    }
}

#[test]
fn results_never_exceed_ten() {
    let mut html = String::from(r#"<article class="api-doc-article">"#);
    for i in 0..40 {
        html.push_str(&format!("<h2>Endpoint {}</h2><p>Endpoint {} details</p>", i, i));
    }
    html.push_str("</article>");
    let page = Page::parse(&html);
    let index = index_of(&page);
    check!(index.len() == 80);

    let outcome = search(&index, "endpoint");
    check!(outcome.results().len() == 10);
    check!(outcome.results().iter().all(|r| r.entry.kind == EntryKind::Heading));
    check!(result_ids(&outcome)[0] == "endpoint-0");
}

#[rstest]
fn configured_engine_respects_limits(docs_page: Page) {
    let settings = SearchSettings {
        max_results: 3,
        min_query_chars: 3,
        ..SearchSettings::default()
    };
    let index = build_index(&docs_page, &settings);
    let engine = QueryEngine::new(settings);

    check!(engine.search(&index, "or").is_too_short());
    check!(result_ids(&engine.search(&index, "order")) == ["orders-api", "create-an-order", "cancel-an-order"]);
}

// --- Result surface ---

#[rstest]
fn selecting_a_result_scrolls_to_its_element(docs_page: Page) {
    let index = index_of(&docs_page);
    let mut surface = SearchSurface::new(&index, QueryEngine::default());

    let SurfaceState::Results(rows) = surface.on_query_changed("decimal").clone() else {
        panic!("expected results");
    };
    check!(rows.len() == 1);
    check!(rows[0].title_html == "All prices are <mark>decimal</mark> strings.");

    let now = Instant::now();
    let navigation = surface.on_result_selected(&rows[0].id, now).unwrap();
    check!(*surface.state() == SurfaceState::Hidden);

    let target = docs_page.resolve(&navigation.locator).unwrap();
    check!(target.tag() == "p");
    check!(target.text_content() == "All prices are decimal strings.");

    check!(surface.tick(now + Duration::from_millis(1000)).is_empty());
    check!(surface.tick(now + navigation.highlight_for) == [rows[0].id.clone()]);
}

#[rstest]
fn surface_follows_the_state_machine(docs_page: Page) {
    let index = index_of(&docs_page);
    let mut surface = SearchSurface::new(&index, QueryEngine::default());

    check!(*surface.state() == SurfaceState::Hidden);
    check!(matches!(surface.on_query_changed("or"), SurfaceState::Results(_)));
    check!(*surface.on_query_changed("orx") == SurfaceState::NoResults);
    check!(*surface.on_query_changed("o") == SurfaceState::Hidden);
    check!(matches!(surface.on_query_changed("order"), SurfaceState::Results(_)));
    surface.on_click_outside();
    check!(*surface.state() == SurfaceState::Hidden);
}
