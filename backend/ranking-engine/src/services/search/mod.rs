//! Search-ranking model: flat point scales for relevance, popularity,
//! recency, connection degree and result quality.

use crate::error::Result;
use crate::models::{RankedList, ScoreResult, SearchResult, SearcherContext, WeightedFeature};
use crate::services::ranking::{rank, weighted_sum};
use crate::utils::clamp_rate;

const MODEL: &str = "search_ranking";

const RELEVANCE_EXACT: f64 = 40.0;
const RELEVANCE_PARTIAL: f64 = 30.0;
const RELEVANCE_FUZZY: f64 = 20.0;
const CONNECTION_DIRECT: f64 = 15.0;
const CONNECTION_MUTUAL: f64 = 8.0;

/// Rank search results for a query, best first.
pub fn rank_results(
    query: &str,
    results: Vec<SearchResult>,
    searcher: &SearcherContext,
) -> RankedList<SearchResult> {
    rank(results, |result| score(query, result, searcher))
}

/// Score one result. Infallible in practice; the `Result` keeps the adapter
/// signature uniform with the other models.
pub fn score(
    query: &str,
    result: &SearchResult,
    searcher: &SearcherContext,
) -> Result<ScoreResult> {
    let engagement_rate = clamp_rate(MODEL, "engagement_rate", result.engagement_rate);
    let days_since_active = result.days_since_active.max(0.0);

    let features = vec![
        WeightedFeature::flat("relevance", relevance_points(query, &result.display_name)),
        WeightedFeature::flat(
            "popularity",
            ((f64::from(result.follower_count) + 1.0).ln() * 3.0).min(15.0),
        ),
        WeightedFeature::flat("recency", (20.0 - days_since_active).max(0.0) * 0.20),
        WeightedFeature::flat("connection", connection_points(result, searcher)),
        WeightedFeature::flat("quality", (engagement_rate * 100.0).min(10.0)),
    ];

    Ok(weighted_sum(result.user_id.to_string(), features))
}

/// Exact match 40, substring 30, in-order character subsequence 20, else 0.
fn relevance_points(query: &str, name: &str) -> f64 {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return 0.0;
    }
    let name = name.to_lowercase();

    if name == query {
        RELEVANCE_EXACT
    } else if name.contains(&query) {
        RELEVANCE_PARTIAL
    } else if is_subsequence(&query, &name) {
        RELEVANCE_FUZZY
    } else {
        0.0
    }
}

fn connection_points(result: &SearchResult, searcher: &SearcherContext) -> f64 {
    if searcher.connections.contains(&result.user_id) {
        CONNECTION_DIRECT
    } else if searcher
        .mutual_connection_counts
        .get(&result.user_id)
        .copied()
        .unwrap_or(0)
        > 0
    {
        CONNECTION_MUTUAL
    } else {
        0.0
    }
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut chars = needle.chars();
    let mut next = chars.next();
    for c in haystack.chars() {
        if Some(c) == next {
            next = chars.next();
            if next.is_none() {
                return true;
            }
        }
    }
    next.is_none()
}
