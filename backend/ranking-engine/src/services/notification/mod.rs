//! Notification delivery gate: category-to-tier lookup followed by a fixed
//! rule chain evaluated first-match-wins. Pure function of the event and a
//! recipient-state snapshot; the caller owns timers and actual delivery.

use crate::config::NotificationConfig;
use crate::models::{
    NotificationCategory, NotificationDecision, NotificationEvent, PriorityTier,
    UserActivitySnapshot,
};

/// Priority tier for a notification category. Unknown categories are low.
pub fn priority_tier(category: NotificationCategory) -> PriorityTier {
    match category {
        NotificationCategory::PrayerRequest => PriorityTier::Urgent,
        NotificationCategory::DirectMessage | NotificationCategory::ConnectionRequest => {
            PriorityTier::High
        }
        NotificationCategory::Comment | NotificationCategory::Mention => PriorityTier::Medium,
        NotificationCategory::PostLike
        | NotificationCategory::FollowSuggestion
        | NotificationCategory::Unknown => PriorityTier::Low,
    }
}

/// Decide whether to deliver now, batch, or defer.
///
/// Rule order is load-bearing: frequency capping runs before the
/// do-not-disturb check, and urgent notifications bypass both.
pub fn decide(
    event: &NotificationEvent,
    state: &UserActivitySnapshot,
    config: &NotificationConfig,
) -> NotificationDecision {
    let tier = priority_tier(event.category);
    let urgent = tier == PriorityTier::Urgent;

    if state.notifications_last_hour > config.batch_after_recent && !urgent {
        return NotificationDecision::Batch;
    }

    if state.in_do_not_disturb && !urgent {
        return NotificationDecision::Defer {
            until: state.next_active_at,
        };
    }

    if urgent || (state.active_now && state.notifications_last_hour < config.active_send_below) {
        return NotificationDecision::SendNow;
    }

    NotificationDecision::Batch
}
