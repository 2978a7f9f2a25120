//! Engine facade: one validated configuration, eight scoring surfaces.

use crate::config::{DiscoveryLimits, EngineConfig};
use crate::error::Result;
use crate::models::{
    AuthorMeta, CommunityProfile, ConversationSnapshot, DiscoveryPools, MatchProfile,
    ModerationResult, NotificationDecision, NotificationEvent, PrayerRequestSnapshot, RankedList,
    ScoreResult, SearchResult, SearcherContext, UserActivitySnapshot,
};
use crate::services::moderation::ContentModerator;
use crate::services::{
    conversation, discovery, matching, notification, prayer, recommendation, search,
};
use chrono::{DateTime, Utc};
use std::hash::Hash;

/// Default truncation for user recommendations.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 20;

/// Multi-signal scoring and ranking engine.
///
/// Holds the validated weight tables and the compiled moderator; everything
/// else is per-call state. All methods are pure and synchronous, so one
/// engine can serve any number of concurrent callers without locking.
#[derive(Debug)]
pub struct ScoringEngine {
    config: EngineConfig,
    moderator: ContentModerator,
}

impl ScoringEngine {
    /// Build an engine from a configuration, validating the weight tables
    /// once up front. Misconfigured weights fail here, never mid-scoring.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let moderator = ContentModerator::new(&config.moderation);
        Ok(Self { config, moderator })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Conversation inbox priority.
    pub fn score_conversation(
        &self,
        conversation: &ConversationSnapshot,
        now: DateTime<Utc>,
    ) -> Result<ScoreResult> {
        conversation::score(conversation, &self.config.conversation, now)
    }

    /// Connection-match compatibility between two profiles.
    pub fn score_match(&self, user: &MatchProfile, candidate: &MatchProfile) -> Result<ScoreResult> {
        matching::score(user, candidate)
    }

    /// Moderate one content submission.
    pub fn moderate_content(&self, text: &str, author: &AuthorMeta) -> Result<ModerationResult> {
        self.moderator.check(text, author)
    }

    /// People-you-may-know recommendations truncated to the default limit.
    pub fn recommend_users_default(
        &self,
        current: &CommunityProfile,
        candidates: Vec<CommunityProfile>,
    ) -> RankedList<CommunityProfile> {
        self.recommend_users(current, candidates, DEFAULT_RECOMMENDATION_LIMIT)
    }

    /// People-you-may-know recommendations, best first, truncated to `limit`.
    /// The current user never appears in the output.
    pub fn recommend_users(
        &self,
        current: &CommunityProfile,
        candidates: Vec<CommunityProfile>,
        limit: usize,
    ) -> RankedList<CommunityProfile> {
        recommendation::recommend(current, candidates, &self.config.recommendation, limit)
    }

    /// Rank people-search results for a query.
    pub fn rank_search_results(
        &self,
        query: &str,
        results: Vec<SearchResult>,
        searcher: &SearcherContext,
    ) -> RankedList<SearchResult> {
        search::rank_results(query, results, searcher)
    }

    /// Delivery decision for one notification event.
    pub fn decide_notification(
        &self,
        event: &NotificationEvent,
        state: &UserActivitySnapshot,
    ) -> NotificationDecision {
        notification::decide(event, state, &self.config.notification)
    }

    /// Prayer-request urgency.
    pub fn score_prayer_request(
        &self,
        request: &PrayerRequestSnapshot,
        now: DateTime<Utc>,
    ) -> Result<ScoreResult> {
        prayer::score(request, now)
    }

    /// Discovery feed blend over caller-supplied recall pools.
    pub fn discover_content<T, K, F>(&self, pools: DiscoveryPools<T>, key: F) -> Vec<T>
    where
        K: Eq + Hash,
        F: Fn(&T) -> K,
    {
        discovery::blend(pools, &self.config.discovery, key)
    }

    pub fn discovery_limits(&self) -> &DiscoveryLimits {
        &self.config.discovery
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn engine_builds_with_default_config() {
        ScoringEngine::new(EngineConfig::default()).unwrap();
    }

    #[test]
    fn misconfigured_weights_fail_construction() {
        let mut config = EngineConfig::default();
        config.recommendation.shared_churches = 0.90;

        let err = ScoringEngine::new(config).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidWeights {
                model: "user_recommendation",
                ..
            }
        ));
    }
}
