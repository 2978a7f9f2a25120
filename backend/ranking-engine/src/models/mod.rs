use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use uuid::Uuid;

/// One feature contribution inside a scoring model.
///
/// `value` is pre-clamped to [0, 100] by the adapter that produced it.
/// Flat-additive features carry `weight = 1.0` so the weighted sum holds
/// uniformly across mixed-scale models.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedFeature {
    pub name: &'static str,
    pub weight: f64,
    pub value: f64,
}

impl WeightedFeature {
    pub fn new(name: &'static str, weight: f64, value: f64) -> Self {
        Self {
            name,
            weight,
            value,
        }
    }

    /// Flat point contribution (weight 1.0).
    pub fn flat(name: &'static str, value: f64) -> Self {
        Self::new(name, 1.0, value)
    }
}

/// Final score for one subject, with the per-feature breakdown retained
/// in adapter emission order for auditability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub subject_id: String,
    pub score: f64,
    pub breakdown: Vec<WeightedFeature>,
}

/// A ranked item paired with the score that placed it.
#[derive(Debug, Clone)]
pub struct Ranked<T> {
    pub item: T,
    pub result: ScoreResult,
}

/// Descending-by-score ordering; ties keep input order (stable sort).
pub type RankedList<T> = Vec<Ranked<T>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    Profanity,
    Hostility,
    Spam,
    ReportedAuthor,
    Shouting,
}

impl FlagKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagKind::Profanity => "profanity",
            FlagKind::Hostility => "hostility",
            FlagKind::Spam => "spam",
            FlagKind::ReportedAuthor => "reported_author",
            FlagKind::Shouting => "shouting",
        }
    }
}

/// Outcome of a single content-moderation pass. Computed fresh per
/// submission and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModerationResult {
    pub is_allowed: bool,
    pub flags: BTreeSet<FlagKind>,
    pub risk_score: f64,
    pub requires_review: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum NotificationDecision {
    SendNow,
    Batch,
    Defer { until: DateTime<Utc> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    Urgent,
    High,
    Medium,
    Low,
}

impl PriorityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTier::Urgent => "urgent",
            PriorityTier::High => "high",
            PriorityTier::Medium => "medium",
            PriorityTier::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    PrayerRequest,
    DirectMessage,
    ConnectionRequest,
    Comment,
    Mention,
    PostLike,
    FollowSuggestion,
    /// Categories added by newer clients rank as low priority.
    #[serde(other)]
    Unknown,
}

/// Per-conversation activity stats, pre-aggregated by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    pub conversation_id: String,
    pub last_message_at: Option<DateTime<Utc>>,
    pub messages_last_7d: u32,
    /// Fraction of this user's messages the other party replied to, 0.0..=1.0.
    pub response_rate: f64,
    pub mutual_interactions: u32,
    pub shared_topic_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    Student,
    YoungAdult,
    Married,
    Parent,
    EmptyNester,
    Senior,
}

impl LifeStage {
    pub(crate) fn stage_index(self) -> i8 {
        match self {
            LifeStage::Student => 0,
            LifeStage::YoungAdult => 1,
            LifeStage::Married => 2,
            LifeStage::Parent => 3,
            LifeStage::EmptyNester => 4,
            LifeStage::Senior => 5,
        }
    }
}

/// Connection-matching profile. Denomination strings are compared verbatim;
/// callers normalize casing upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchProfile {
    pub user_id: Uuid,
    pub denomination: String,
    pub compatible_denominations: HashSet<String>,
    /// Self-reported faith practice level, 0..=100.
    pub faith_commitment: f64,
    pub values: HashSet<String>,
    pub life_stage: LifeStage,
    pub interests: HashSet<String>,
    pub location: Option<GeoPoint>,
}

/// Author metadata accompanying a content submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorMeta {
    pub user_id: Option<Uuid>,
    pub report_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLevel {
    Low,
    Medium,
    High,
}

/// Community profile used for people-you-may-know recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityProfile {
    pub user_id: Uuid,
    pub churches: HashSet<String>,
    pub interests: HashSet<String>,
    pub connections: HashSet<Uuid>,
    pub engagement_level: EngagementLevel,
    pub location: Option<GeoPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub user_id: Uuid,
    pub display_name: String,
    pub follower_count: u32,
    pub days_since_active: f64,
    /// Interactions per impression, 0.0..=1.0.
    pub engagement_rate: f64,
}

/// Snapshot of the searching user's graph, pre-fetched by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearcherContext {
    pub user_id: Uuid,
    pub connections: HashSet<Uuid>,
    pub mutual_connection_counts: HashMap<Uuid, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub notification_id: String,
    pub category: NotificationCategory,
}

/// Recipient-side state at decision time. The caller owns the clock and the
/// delivery counters; the gate is a pure function of this snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserActivitySnapshot {
    pub notifications_last_hour: u32,
    pub in_do_not_disturb: bool,
    pub active_now: bool,
    pub next_active_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrayerRequestSnapshot {
    pub request_id: String,
    pub text: String,
    pub posted_at: Option<DateTime<Utc>>,
    /// Average response rate for this request's category, 0.0..=1.0.
    pub category_response_rate: f64,
    pub author_rarely_posts: bool,
}

/// Candidate pools for the discovery blend, supplied by upstream recall
/// sources in their own preferred order.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryPools<T> {
    pub collaborative: Vec<T>,
    pub trending: Vec<T>,
    pub serendipity: Vec<T>,
    pub rising_creators: Vec<T>,
}
