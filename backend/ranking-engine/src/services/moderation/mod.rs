//! Content-moderation model: independent detectors contribute flat point
//! values to an additive risk score, then fixed thresholds decide the
//! outcome. A risky determination is a normal return value, never an error.

use crate::config::ModerationConfig;
use crate::error::{EngineError, Result};
use crate::models::{AuthorMeta, FlagKind, ModerationResult};
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use unicode_segmentation::UnicodeSegmentation;

const PROFANITY_POINTS: f64 = 30.0;
const HOSTILITY_POINTS: f64 = 40.0;
const SPAM_POINTS: f64 = 50.0;
const REPORTED_AUTHOR_POINTS: f64 = 20.0;
const SHOUTING_POINTS: f64 = 15.0;

/// Minimum length before the all-caps check applies.
const SHOUTING_MIN_LEN: usize = 20;

/// Consecutive repeats of one character that indicate keyboard-mash spam.
const REPEAT_RUN_LEN: usize = 6;

/// Text moderator with word lists and compiled spam patterns. Built once at
/// engine construction; `check` is pure and lock-free thereafter.
#[derive(Debug)]
pub struct ContentModerator {
    profanity: HashSet<String>,
    hostility: Vec<String>,
    spam_patterns: Vec<Regex>,
    report_count_threshold: u32,
    allow_below: f64,
    review_below: f64,
}

impl ContentModerator {
    pub fn new(config: &ModerationConfig) -> Self {
        Self {
            profanity: config
                .profanity_terms
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            hostility: config
                .hostility_terms
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            spam_patterns: Self::compile_patterns(),
            report_count_threshold: config.report_count_threshold,
            allow_below: config.allow_below,
            review_below: config.review_below,
        }
    }

    /// Moderate one content submission.
    ///
    /// Every detector runs independently and each one that fires adds its
    /// fixed points; `risk_score` is clamped to 100. Empty text is the only
    /// error case.
    pub fn check(&self, text: &str, author: &AuthorMeta) -> Result<ModerationResult> {
        if text.trim().is_empty() {
            return Err(EngineError::MissingFeature {
                subject: author
                    .user_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "content".to_string()),
                field: "text",
            });
        }

        let normalized = text.to_lowercase();
        let mut flags = BTreeSet::new();
        let mut risk = 0.0;

        if self.contains_profanity(&normalized) {
            flags.insert(FlagKind::Profanity);
            risk += PROFANITY_POINTS;
        }

        if self.hostility.iter().any(|term| normalized.contains(term)) {
            flags.insert(FlagKind::Hostility);
            risk += HOSTILITY_POINTS;
        }

        if self.looks_like_spam(&normalized) {
            flags.insert(FlagKind::Spam);
            risk += SPAM_POINTS;
        }

        if author.report_count > self.report_count_threshold {
            flags.insert(FlagKind::ReportedAuthor);
            risk += REPORTED_AUTHOR_POINTS;
        }

        if is_shouting(text) {
            flags.insert(FlagKind::Shouting);
            risk += SHOUTING_POINTS;
        }

        let risk_score = risk.min(100.0);
        let is_allowed = risk_score < self.allow_below;
        // At or above review_below the content is rejected outright with no
        // review queue entry.
        let requires_review = risk_score >= self.allow_below && risk_score < self.review_below;

        Ok(ModerationResult {
            is_allowed,
            flags,
            risk_score,
            requires_review,
        })
    }

    fn contains_profanity(&self, normalized: &str) -> bool {
        normalized
            .unicode_words()
            .any(|word| self.profanity.contains(word))
    }

    fn looks_like_spam(&self, normalized: &str) -> bool {
        self.spam_patterns.iter().any(|p| p.is_match(normalized))
            || has_repeated_run(normalized, REPEAT_RUN_LEN)
    }

    fn compile_patterns() -> Vec<Regex> {
        vec![
            Regex::new(r"https?://\S+").expect("URL pattern is valid"),
            Regex::new(r"[!?]{4,}").expect("Punctuation pattern is valid"),
            Regex::new(r"\b(buy now|click here|free money|limited time offer|earn \$\d+)\b")
                .expect("Promo pattern is valid"),
        ]
    }
}

/// All alphabetic characters uppercase and the text longer than the minimum.
fn is_shouting(text: &str) -> bool {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    !letters.is_empty()
        && letters.iter().all(|c| c.is_uppercase())
        && text.chars().count() > SHOUTING_MIN_LEN
}

fn has_repeated_run(text: &str, run_len: usize) -> bool {
    let mut previous = None;
    let mut run = 0;
    for c in text.chars() {
        if Some(c) == previous {
            run += 1;
            if run >= run_len {
                return true;
            }
        } else {
            previous = Some(c);
            run = 1;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moderator() -> ContentModerator {
        ContentModerator::new(&ModerationConfig::default())
    }

    fn author(report_count: u32) -> AuthorMeta {
        AuthorMeta {
            user_id: None,
            report_count,
        }
    }

    #[test]
    fn clean_text_is_allowed() {
        let result = moderator()
            .check("Praying for your family this week.", &author(0))
            .unwrap();

        assert!(result.is_allowed);
        assert!(!result.requires_review);
        assert_eq!(result.risk_score, 0.0);
        assert!(result.flags.is_empty());
    }

    #[test]
    fn shouting_alone_stays_allowed() {
        // 25 characters, all caps: risk 15, below the allow threshold.
        let result = moderator()
            .check("PLEASE JOIN US FOR SERVICE!!!", &author(0))
            .unwrap();

        assert_eq!(result.risk_score, 15.0);
        assert!(result.is_allowed);
        assert!(!result.requires_review);
        assert_eq!(
            result.flags.into_iter().collect::<Vec<_>>(),
            vec![FlagKind::Shouting]
        );
    }

    #[test]
    fn profanity_plus_hostility_requires_review() {
        // 30 + 40 = 70: blocked, queued for review.
        let result = moderator()
            .check("you idiot, this is shit", &author(0))
            .unwrap();

        assert_eq!(result.risk_score, 70.0);
        assert!(!result.is_allowed);
        assert!(result.requires_review);
        assert!(result.flags.contains(&FlagKind::Profanity));
        assert!(result.flags.contains(&FlagKind::Hostility));
    }

    #[test]
    fn high_risk_is_rejected_without_review() {
        // Profanity + hostility + spam + reported author, clamped to 100.
        let result = moderator()
            .check(
                "you idiot, this is shit, click here http://spam.example",
                &author(10),
            )
            .unwrap();

        assert_eq!(result.risk_score, 100.0);
        assert!(!result.is_allowed);
        assert!(!result.requires_review);
        assert_eq!(result.flags.len(), 4);
    }

    #[test]
    fn reported_author_flag_fires_independent_of_text() {
        let result = moderator()
            .check("Blessed to be here today.", &author(6))
            .unwrap();

        assert_eq!(result.risk_score, 20.0);
        assert!(result.is_allowed);
        assert!(result.flags.contains(&FlagKind::ReportedAuthor));
    }

    #[test]
    fn repeated_characters_count_as_spam() {
        let result = moderator().check("amennnnnnnn to that", &author(0)).unwrap();
        assert!(result.flags.contains(&FlagKind::Spam));
        assert_eq!(result.risk_score, 50.0);
    }

    #[test]
    fn short_all_caps_is_not_shouting() {
        let result = moderator().check("AMEN TO THAT", &author(0)).unwrap();
        assert!(!result.flags.contains(&FlagKind::Shouting));
    }

    #[test]
    fn empty_text_is_an_error() {
        let err = moderator().check("   ", &author(0)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingFeature { field: "text", .. }
        ));
    }

    #[test]
    fn resubmission_is_idempotent() {
        let m = moderator();
        let first = m.check("you idiot, this is shit", &author(0)).unwrap();
        let second = m.check("you idiot, this is shit", &author(0)).unwrap();
        assert_eq!(first, second);
    }
}
