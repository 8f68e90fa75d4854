//! Seed search-query construction for a section.

use chrono::Datelike;
use chronicle_core::models::section::SectionSpec;
use chronicle_core::models::window::TimeWindow;

/// Sector keyword queries used per section.
const MAX_KEYWORD_QUERIES: usize = 3;

/// Entity news queries used per section.
const MAX_ENTITY_QUERIES: usize = 5;

/// Build the seed queries for one section: sector keywords suffixed with
/// the window's end year, then `"<entity> news"` for the tracked entities.
/// A region focus, when present, is appended to every query.
pub fn build_search_queries(
    section: &SectionSpec,
    window: &TimeWindow,
    region_focus: Option<&str>,
) -> Vec<String> {
    let year = window.end.year();
    let mut queries = Vec::new();

    for keyword in section.keywords.iter().take(MAX_KEYWORD_QUERIES) {
        queries.push(format!("{keyword} {year}"));
    }
    for entity in section.entities.iter().take(MAX_ENTITY_QUERIES) {
        queries.push(format!("{entity} news"));
    }

    if let Some(region) = region_focus {
        for query in &mut queries {
            query.push(' ');
            query.push_str(region);
        }
    }

    queries
}
