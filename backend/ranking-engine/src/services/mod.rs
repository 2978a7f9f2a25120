pub mod conversation;
pub mod discovery;
pub mod matching;
pub mod moderation;
pub mod notification;
pub mod prayer;
pub mod ranking;
pub mod recommendation;
pub mod search;

pub use moderation::ContentModerator;
pub use ranking::{rank, rank_with_tie_break, validate_weights, weighted_sum};
