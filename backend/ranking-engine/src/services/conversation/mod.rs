//! Conversation-priority model: surfaces the chats a user is most likely to
//! want at the top of the inbox.

use crate::config::ConversationWeights;
use crate::error::{EngineError, Result};
use crate::models::{ConversationSnapshot, ScoreResult, WeightedFeature};
use crate::services::ranking::weighted_sum;
use crate::utils::{clamp_feature, clamp_rate};
use chrono::{DateTime, Utc};

const MODEL: &str = "conversation_priority";

/// Score one conversation against the weighted table.
///
/// `now` is caller-supplied so identical inputs always produce identical
/// scores.
pub fn score(
    conversation: &ConversationSnapshot,
    weights: &ConversationWeights,
    now: DateTime<Utc>,
) -> Result<ScoreResult> {
    let features = extract_features(conversation, weights, now)?;
    Ok(weighted_sum(conversation.conversation_id.clone(), features))
}

fn extract_features(
    conversation: &ConversationSnapshot,
    weights: &ConversationWeights,
    now: DateTime<Utc>,
) -> Result<Vec<WeightedFeature>> {
    let last_message_at =
        conversation
            .last_message_at
            .ok_or_else(|| EngineError::MissingFeature {
                subject: conversation.conversation_id.clone(),
                field: "last_message_at",
            })?;

    let hours_since = ((now - last_message_at).num_seconds() as f64 / 3600.0).max(0.0);
    let response_rate = clamp_rate(MODEL, "response_rate", conversation.response_rate);

    Ok(vec![
        WeightedFeature::new(
            "recency",
            weights.recency,
            clamp_feature(MODEL, "recency", (100.0 - hours_since).max(0.0)),
        ),
        WeightedFeature::new(
            "frequency",
            weights.frequency,
            (f64::from(conversation.messages_last_7d) * 10.0).min(100.0),
        ),
        WeightedFeature::new("response_rate", weights.response_rate, response_rate * 100.0),
        WeightedFeature::new(
            "relationship",
            weights.relationship,
            (f64::from(conversation.mutual_interactions) * 5.0).min(100.0),
        ),
        WeightedFeature::new(
            "shared_topics",
            weights.shared_topics,
            (f64::from(conversation.shared_topic_count) * 10.0).min(100.0),
        ),
    ])
}
