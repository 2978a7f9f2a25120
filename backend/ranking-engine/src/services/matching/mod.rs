//! Match-compatibility model for connection suggestions.
//!
//! This model deliberately mixes scales: faith and life-stage alignment are
//! weighted 0-100 sub-scores, while denomination, shared values, interests
//! and proximity are flat point additions. The documented recipe is kept
//! verbatim; the flat features carry weight 1.0 in the breakdown.

use crate::error::{EngineError, Result};
use crate::models::{MatchProfile, ScoreResult, WeightedFeature};
use crate::services::ranking::weighted_sum;
use crate::utils::{clamp_feature, haversine_miles};

const MODEL: &str = "match_compatibility";

const FAITH_WEIGHT: f64 = 0.30;
const LIFE_STAGE_WEIGHT: f64 = 0.10;
const DENOMINATION_EXACT: f64 = 15.0;
const DENOMINATION_COMPATIBLE: f64 = 10.0;

/// Score `candidate` as a potential connection for `user`. Symmetric in its
/// inputs apart from the subject id, which is the candidate's.
pub fn score(user: &MatchProfile, candidate: &MatchProfile) -> Result<ScoreResult> {
    let user_location = user.location.ok_or_else(|| EngineError::MissingFeature {
        subject: user.user_id.to_string(),
        field: "location",
    })?;
    let candidate_location = candidate
        .location
        .ok_or_else(|| EngineError::MissingFeature {
            subject: candidate.user_id.to_string(),
            field: "location",
        })?;

    let user_commitment = clamp_feature(MODEL, "faith_commitment", user.faith_commitment);
    let candidate_commitment =
        clamp_feature(MODEL, "faith_commitment", candidate.faith_commitment);
    let faith_alignment = 100.0 - (user_commitment - candidate_commitment).abs();

    let shared_values = user.values.intersection(&candidate.values).count() as f64;
    let shared_interests = user.interests.intersection(&candidate.interests).count() as f64;
    let miles = haversine_miles(user_location, candidate_location);

    let features = vec![
        WeightedFeature::new("faith", FAITH_WEIGHT, faith_alignment),
        WeightedFeature::flat("denomination", denomination_points(user, candidate)),
        WeightedFeature::flat("values_overlap", (shared_values * 5.0).min(25.0)),
        WeightedFeature::new(
            "life_stage",
            LIFE_STAGE_WEIGHT,
            life_stage_alignment(user, candidate),
        ),
        WeightedFeature::flat("interests", (shared_interests * 3.0).min(15.0)),
        WeightedFeature::flat("geo", (5.0 - miles / 20.0).max(0.0)),
    ];

    Ok(weighted_sum(candidate.user_id.to_string(), features))
}

fn denomination_points(user: &MatchProfile, candidate: &MatchProfile) -> f64 {
    if user.denomination == candidate.denomination {
        DENOMINATION_EXACT
    } else if user.compatible_denominations.contains(&candidate.denomination)
        || candidate.compatible_denominations.contains(&user.denomination)
    {
        DENOMINATION_COMPATIBLE
    } else {
        0.0
    }
}

/// 100 for the same stage, 50 for an adjacent one, 0 otherwise.
fn life_stage_alignment(user: &MatchProfile, candidate: &MatchProfile) -> f64 {
    match (user.life_stage.stage_index() - candidate.life_stage.stage_index()).abs() {
        0 => 100.0,
        1 => 50.0,
        _ => 0.0,
    }
}
