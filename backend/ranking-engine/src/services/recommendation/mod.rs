//! User-recommendation model: ranks community members by shared churches,
//! interests, mutual connections, proximity and engagement fit.

use crate::config::RecommendationWeights;
use crate::error::{EngineError, Result};
use crate::models::{CommunityProfile, RankedList, ScoreResult, WeightedFeature};
use crate::services::ranking::{rank, weighted_sum};
use crate::utils::haversine_miles;

const ENGAGEMENT_MATCH_POINTS: f64 = 5.0;

/// Rank candidate profiles for `current`, best first, truncated to `limit`.
///
/// The current user is never a candidate in the output. Candidates missing a
/// required feature (location) are dropped from the list rather than failing
/// the call.
pub fn recommend(
    current: &CommunityProfile,
    candidates: Vec<CommunityProfile>,
    weights: &RecommendationWeights,
    limit: usize,
) -> RankedList<CommunityProfile> {
    let candidates: Vec<CommunityProfile> = candidates
        .into_iter()
        .filter(|candidate| candidate.user_id != current.user_id)
        .collect();

    let mut ranked = rank(candidates, |candidate| score(current, candidate, weights));
    ranked.truncate(limit);
    ranked
}

/// Score one candidate against the weighted table.
pub fn score(
    current: &CommunityProfile,
    candidate: &CommunityProfile,
    weights: &RecommendationWeights,
) -> Result<ScoreResult> {
    let current_location = current
        .location
        .ok_or_else(|| EngineError::MissingFeature {
            subject: current.user_id.to_string(),
            field: "location",
        })?;
    let candidate_location = candidate
        .location
        .ok_or_else(|| EngineError::MissingFeature {
            subject: candidate.user_id.to_string(),
            field: "location",
        })?;

    let shared_churches = current.churches.intersection(&candidate.churches).count() as f64;
    let shared_interests = current
        .interests
        .intersection(&candidate.interests)
        .count() as f64;
    let mutual_connections = current
        .connections
        .intersection(&candidate.connections)
        .count() as f64;
    let miles = haversine_miles(current_location, candidate_location);

    let features = vec![
        WeightedFeature::new(
            "shared_churches",
            weights.shared_churches,
            (shared_churches * 20.0).min(100.0),
        ),
        WeightedFeature::new(
            "shared_interests",
            weights.shared_interests,
            (shared_interests * 5.0).min(100.0),
        ),
        WeightedFeature::new(
            "mutual_connections",
            weights.mutual_connections,
            (mutual_connections * 8.0).min(100.0),
        ),
        WeightedFeature::new("geo", weights.proximity, ((50.0 - miles) / 5.0).max(0.0)),
        WeightedFeature::new(
            "engagement_match",
            weights.engagement_match,
            if current.engagement_level == candidate.engagement_level {
                ENGAGEMENT_MATCH_POINTS
            } else {
                0.0
            },
        ),
    ];

    Ok(weighted_sum(candidate.user_id.to_string(), features))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EngagementLevel, GeoPoint};
    use std::collections::HashSet;
    use uuid::Uuid;

    fn profile(churches: &[&str], interests: &[&str]) -> CommunityProfile {
        CommunityProfile {
            user_id: Uuid::new_v4(),
            churches: churches.iter().map(|c| c.to_string()).collect(),
            interests: interests.iter().map(|i| i.to_string()).collect(),
            connections: HashSet::new(),
            engagement_level: EngagementLevel::Medium,
            location: Some(GeoPoint {
                lat: 34.05,
                lon: -118.24,
            }),
        }
    }

    #[test]
    fn closer_community_overlap_ranks_first() {
        let current = profile(&["first-baptist"], &["worship", "hiking"]);

        let strong = profile(&["first-baptist"], &["worship", "hiking"]);
        let weak = profile(&["grace-chapel"], &["cycling"]);

        let ranked = recommend(
            &current,
            vec![weak.clone(), strong.clone()],
            &RecommendationWeights::default(),
            20,
        );

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].item.user_id, strong.user_id);
        assert_eq!(ranked[1].item.user_id, weak.user_id);
    }

    #[test]
    fn current_user_is_never_recommended() {
        let current = profile(&["first-baptist"], &["worship"]);
        let other = profile(&["first-baptist"], &["worship"]);

        let ranked = recommend(
            &current,
            vec![current.clone(), other],
            &RecommendationWeights::default(),
            20,
        );

        assert_eq!(ranked.len(), 1);
        assert!(ranked
            .iter()
            .all(|entry| entry.item.user_id != current.user_id));
    }

    #[test]
    fn limit_truncates_after_ranking() {
        let current = profile(&["first-baptist"], &["worship"]);
        let candidates: Vec<CommunityProfile> =
            (0..30).map(|_| profile(&["first-baptist"], &[])).collect();

        let ranked = recommend(&current, candidates, &RecommendationWeights::default(), 20);
        assert_eq!(ranked.len(), 20);
    }

    #[test]
    fn candidate_without_location_is_dropped_not_fatal() {
        let current = profile(&["first-baptist"], &["worship"]);
        let mut missing = profile(&["first-baptist"], &["worship"]);
        missing.location = None;
        let present = profile(&["first-baptist"], &[]);

        let ranked = recommend(
            &current,
            vec![missing, present.clone()],
            &RecommendationWeights::default(),
            20,
        );

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].item.user_id, present.user_id);
    }

    #[test]
    fn known_input_scores_exactly() {
        let mut current = profile(&["first-baptist", "city-chapel"], &["worship", "hiking"]);
        let mut candidate = profile(&["first-baptist"], &["worship", "hiking", "reading"]);

        let shared_friend = Uuid::new_v4();
        current.connections.insert(shared_friend);
        candidate.connections.insert(shared_friend);

        // churches 20*0.40 + interests 10*0.25 + mutual 8*0.20
        // + geo 10*0.10 + engagement 5*0.05 = 13.35
        let result = score(&current, &candidate, &RecommendationWeights::default()).unwrap();
        assert!((result.score - 13.35).abs() < 1e-6, "got {}", result.score);
    }
}
