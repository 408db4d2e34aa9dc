//! Cosmetic telemetry: randomized confidence tag and ring gauges.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{TelemetrySnapshot, EMOTION_LABELS};

const BASE_CONFIDENCE: i32 = 94;
const MIN_CONFIDENCE: i32 = 85;
const MAX_CONFIDENCE: i32 = 99;

/// Half-open ranges for face, voice, text and unified rings.
pub const RING_RANGES: [(u8, u8); 4] = [(70, 90), (60, 85), (75, 90), (80, 90)];

/// Produce one display refresh.
pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> TelemetrySnapshot {
    let variation: i32 = rng.gen_range(-2..=3);
    let confidence = (BASE_CONFIDENCE + variation).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) as u8;
    let emotion = EMOTION_LABELS
        .choose(rng)
        .copied()
        .unwrap_or("calm")
        .to_string();
    let rings = RING_RANGES.map(|(lo, hi)| rng.gen_range(lo..hi));

    TelemetrySnapshot {
        confidence,
        emotion,
        rings,
    }
}
