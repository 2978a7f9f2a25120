//! Prayer-request urgency model: flat point boosts for urgent language,
//! freshness, category engagement, and authors who rarely post.

use crate::error::{EngineError, Result};
use crate::models::{PrayerRequestSnapshot, ScoreResult, WeightedFeature};
use crate::services::ranking::weighted_sum;
use crate::utils::clamp_rate;
use chrono::{DateTime, Utc};

const MODEL: &str = "prayer_urgency";

const URGENT_KEYWORD_POINTS: f64 = 40.0;
const RARITY_POINTS: f64 = 10.0;

const URGENT_KEYWORDS: &[&str] = &[
    "emergency",
    "hospital",
    "surgery",
    "dying",
    "critical",
    "accident",
    "urgent",
    "crisis",
    "hospice",
];

/// Score one prayer request. `now` is caller-supplied.
pub fn score(request: &PrayerRequestSnapshot, now: DateTime<Utc>) -> Result<ScoreResult> {
    let posted_at = request
        .posted_at
        .ok_or_else(|| EngineError::MissingFeature {
            subject: request.request_id.clone(),
            field: "posted_at",
        })?;

    let hours_since = ((now - posted_at).num_seconds() as f64 / 3600.0).max(0.0);
    let normalized = request.text.to_lowercase();
    let has_urgent_language = URGENT_KEYWORDS.iter().any(|kw| normalized.contains(kw));
    let response_rate = clamp_rate(MODEL, "category_response_rate", request.category_response_rate);

    let features = vec![
        WeightedFeature::flat(
            "urgent_keywords",
            if has_urgent_language {
                URGENT_KEYWORD_POINTS
            } else {
                0.0
            },
        ),
        WeightedFeature::flat("recency", (30.0 - hours_since * 2.0).max(0.0)),
        WeightedFeature::flat("category_engagement", (response_rate * 20.0).min(20.0)),
        WeightedFeature::flat(
            "rarity_boost",
            if request.author_rarely_posts {
                RARITY_POINTS
            } else {
                0.0
            },
        ),
    ];

    Ok(weighted_sum(request.request_id.clone(), features))
}
