//! Canned "AI" replies and sentiment badges, ordered substring matching.
//!
//! Both tables are scanned top to bottom and the first rule with a matching
//! trigger wins, so the order of the rules is observable behavior.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Sentiment, SentimentKind};

/// Reply rules: (triggers, reply). Scanned in order.
pub const REPLY_RULES: &[(&[&str], &str)] = &[
    (
        &["stress", "anxious"],
        "Detecting elevated stress markers. Recommend deep breathing protocol. I'm here to help.",
    ),
    (
        &["hello", "hi"],
        "Hello, crew member. All vital signs nominal. How are you feeling today?",
    ),
    (
        &["help", "support"],
        "Initiating cognitive support protocol. Edge-AI analysis suggests calm focus.",
    ),
    (
        &["thank"],
        "You're welcome. MAITRI is here for your psychological safety.",
    ),
    (
        &["status", "report"],
        "All systems stable. Stress index: 0.23. Cognitive load: moderate.",
    ),
];

/// Generic acknowledgments used when no rule matches.
pub const DEFAULT_REPLIES: &[&str] = &[
    "Acknowledged. Edge inference suggests nominal cognitive state.",
    "Message received. Running multimodal analysis...",
    "Logging to mission telemetry. Continue.",
    "Processing through neural fusion layers. Please stand by.",
];

/// Sentiment rules: (triggers, kind). Scanned in order, neutral otherwise.
pub const SENTIMENT_RULES: &[(&[&str], SentimentKind)] = &[
    (&["stress", "anxious", "worried"], SentimentKind::Stress),
    (&["good", "great", "fine"], SentimentKind::Positive),
    (&["?", "help"], SentimentKind::Question),
];

fn first_match<'a, T: Copy>(text: &str, rules: &'a [(&'a [&'a str], T)]) -> Option<T> {
    let lower = text.to_lowercase();
    rules
        .iter()
        .find(|(triggers, _)| triggers.iter().any(|t| lower.contains(t)))
        .map(|(_, value)| *value)
}

/// Pick the reply for a line of user input.
pub fn respond<R: Rng + ?Sized>(input: &str, rng: &mut R) -> &'static str {
    first_match(input, REPLY_RULES).unwrap_or_else(|| {
        DEFAULT_REPLIES
            .choose(rng)
            .copied()
            .unwrap_or(DEFAULT_REPLIES[0])
    })
}

/// Classify a user message for its badge.
pub fn sentiment(text: &str) -> Sentiment {
    first_match(text, SENTIMENT_RULES)
        .unwrap_or(SentimentKind::Neutral)
        .into()
}
