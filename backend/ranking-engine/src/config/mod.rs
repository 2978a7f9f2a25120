use crate::error::{EngineError, Result};
use crate::services::ranking::validate_weights;
use serde::Deserialize;

/// Engine-wide configuration. Constructed by the caller and handed to
/// [`crate::ScoringEngine::new`]; read-only after validation, so concurrent
/// scoring needs no synchronization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub conversation: ConversationWeights,
    pub recommendation: RecommendationWeights,
    pub moderation: ModerationConfig,
    pub notification: NotificationConfig,
    pub discovery: DiscoveryLimits,
}

impl EngineConfig {
    /// Validate the weighted tables and decision thresholds. Runs once at
    /// engine construction; scoring never re-checks.
    pub fn validate(&self) -> Result<()> {
        validate_weights("conversation_priority", &self.conversation.as_table())?;
        validate_weights("user_recommendation", &self.recommendation.as_table())?;

        if self.moderation.allow_below > self.moderation.review_below {
            return Err(EngineError::InvalidConfig(format!(
                "moderation allow_below ({}) must not exceed review_below ({})",
                self.moderation.allow_below, self.moderation.review_below
            )));
        }

        Ok(())
    }
}

/// Weights for the conversation-priority model. Must sum to 1.0.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConversationWeights {
    pub recency: f64,
    pub frequency: f64,
    pub response_rate: f64,
    pub relationship: f64,
    pub shared_topics: f64,
}

impl ConversationWeights {
    pub(crate) fn as_table(&self) -> [f64; 5] {
        [
            self.recency,
            self.frequency,
            self.response_rate,
            self.relationship,
            self.shared_topics,
        ]
    }
}

impl Default for ConversationWeights {
    fn default() -> Self {
        Self {
            recency: 0.30,
            frequency: 0.20,
            response_rate: 0.25,
            relationship: 0.15,
            shared_topics: 0.10,
        }
    }
}

/// Weights for the user-recommendation model. Must sum to 1.0.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecommendationWeights {
    pub shared_churches: f64,
    pub shared_interests: f64,
    pub mutual_connections: f64,
    pub proximity: f64,
    pub engagement_match: f64,
}

impl RecommendationWeights {
    pub(crate) fn as_table(&self) -> [f64; 5] {
        [
            self.shared_churches,
            self.shared_interests,
            self.mutual_connections,
            self.proximity,
            self.engagement_match,
        ]
    }
}

impl Default for RecommendationWeights {
    fn default() -> Self {
        Self {
            shared_churches: 0.40,
            shared_interests: 0.25,
            mutual_connections: 0.20,
            proximity: 0.10,
            engagement_match: 0.05,
        }
    }
}

/// Word lists and decision thresholds for content moderation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModerationConfig {
    pub profanity_terms: Vec<String>,
    pub hostility_terms: Vec<String>,
    /// Author report count above which the reported-author flag fires.
    pub report_count_threshold: u32,
    /// Risk below this is allowed through.
    pub allow_below: f64,
    /// Risk in [allow_below, review_below) is held for manual review;
    /// anything at or above review_below is rejected outright.
    pub review_below: f64,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            profanity_terms: ["damn", "hell", "crap", "ass", "bitch", "shit", "fuck"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
            hostility_terms: [
                "hate you",
                "kill yourself",
                "shut up",
                "you idiot",
                "you are stupid",
                "nobody likes you",
                "pathetic",
                "loser",
            ]
            .iter()
            .map(|w| w.to_string())
            .collect(),
            report_count_threshold: 5,
            allow_below: 50.0,
            review_below: 80.0,
        }
    }
}

/// Delivery-gate thresholds for the notification decision.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Non-urgent notifications batch once the last hour exceeds this count.
    pub batch_after_recent: u32,
    /// Immediate delivery to an active user requires fewer recent
    /// notifications than this.
    pub active_send_below: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            batch_after_recent: 10,
            active_send_below: 5,
        }
    }
}

/// Per-section item caps for the discovery blend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoveryLimits {
    pub collaborative: usize,
    pub trending: usize,
    pub serendipity: usize,
    pub rising_creators: usize,
}

impl Default for DiscoveryLimits {
    fn default() -> Self {
        Self {
            collaborative: 5,
            trending: 3,
            serendipity: 1,
            rising_creators: 2,
        }
    }
}
