//! Mood self-assessment scoring
//!
//! Maps three questionnaire answers and an emoji rating to one of four fixed
//! mood classifications. The scorer is total: malformed answers are replaced
//! by neutral defaults instead of producing an error.
//!
//! # Scoring
//!
//! ```text
//! stress_component = 11 - q3
//! raw              = q1 + q2 + stress_component
//! emoji_offset     = (3 - emoji_score) * 2
//! combined         = raw + emoji_offset
//! ```
//!
//! `combined` is bucketed as calm (<= 10), neutral (<= 18), stressed (<= 24)
//! and anxious (everything above).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;
use tracing::trace;

/// Neutral answer substituted for a missing or malformed q1/q2/q3
pub const DEFAULT_ANSWER: i64 = 5;

/// Neutral emoji rating substituted for a missing or malformed emoji score
pub const DEFAULT_EMOJI_SCORE: i64 = 3;

/// Highest combined score still classified as calm
pub const CALM_MAX: i128 = 10;

/// Highest combined score still classified as neutral
pub const NEUTRAL_MAX: i128 = 18;

/// Highest combined score still classified as stressed
pub const STRESSED_MAX: i128 = 24;

/// Coerce a raw form value to an integer, falling back to `default`
///
/// Surrounding whitespace is ignored and an optional leading sign is
/// accepted. Integer literals beyond the `i64` range saturate to
/// `i64::MAX`/`i64::MIN` and are still scored. Missing, empty and
/// non-integer values yield `default`.
pub fn coerce_answer(raw: Option<&str>, default: i64) -> i64 {
    let Some(value) = raw.map(str::trim) else {
        return default;
    };

    match value.parse::<i64>() {
        Ok(parsed) => parsed,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => {
                trace!("Substituting default {} for {:?}: {}", default, value, e);
                default
            }
        },
    }
}

/// Coerced questionnaire answers
///
/// Values outside the intended ranges (1-10 for the questions, 1-5 for the
/// emoji rating) are accepted and scored as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assessment {
    pub q1: i64,
    pub q2: i64,
    /// Inverted before use: a higher q3 means less stress
    pub q3: i64,
    pub emoji_score: i64,
}

impl Default for Assessment {
    fn default() -> Self {
        Self {
            q1: DEFAULT_ANSWER,
            q2: DEFAULT_ANSWER,
            q3: DEFAULT_ANSWER,
            emoji_score: DEFAULT_EMOJI_SCORE,
        }
    }
}

impl Assessment {
    pub fn new(q1: i64, q2: i64, q3: i64, emoji_score: i64) -> Self {
        Self {
            q1,
            q2,
            q3,
            emoji_score,
        }
    }

    /// Build an assessment from raw string answers, substituting defaults
    pub fn from_raw(
        q1: Option<&str>,
        q2: Option<&str>,
        q3: Option<&str>,
        emoji_score: Option<&str>,
    ) -> Self {
        Self {
            q1: coerce_answer(q1, DEFAULT_ANSWER),
            q2: coerce_answer(q2, DEFAULT_ANSWER),
            q3: coerce_answer(q3, DEFAULT_ANSWER),
            emoji_score: coerce_answer(emoji_score, DEFAULT_EMOJI_SCORE),
        }
    }

    pub fn stress_component(&self) -> i128 {
        11 - i128::from(self.q3)
    }

    pub fn raw_score(&self) -> i128 {
        i128::from(self.q1) + i128::from(self.q2) + self.stress_component()
    }

    /// Positive below the neutral emoji midpoint, negative above it
    pub fn emoji_offset(&self) -> i128 {
        (i128::from(DEFAULT_EMOJI_SCORE) - i128::from(self.emoji_score)) * 2
    }

    pub fn combined_score(&self) -> i128 {
        self.raw_score() + self.emoji_offset()
    }

    pub fn classify(&self) -> MoodClassification {
        let combined = self.combined_score();
        MoodClassification::new(Mood::from_combined(combined), combined)
    }
}

/// Raw key/value answers as submitted by a form
///
/// Every field is optional; [`AssessmentForm::into_assessment`] applies the
/// default substitution. Deserializing never fails on a field's value:
/// strings and integers are kept as text, anything else counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssessmentForm {
    #[serde(default, deserialize_with = "lenient_answer")]
    pub q1: Option<String>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub q2: Option<String>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub q3: Option<String>,
    #[serde(default, deserialize_with = "lenient_answer")]
    pub emoji_score: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnswer {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Other(serde::de::IgnoredAny),
}

fn lenient_answer<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawAnswer::deserialize(deserializer)? {
        RawAnswer::Text(text) => Some(text),
        RawAnswer::Signed(n) => Some(n.to_string()),
        RawAnswer::Unsigned(n) => Some(n.to_string()),
        RawAnswer::Other(_) => None,
    })
}

impl AssessmentForm {
    /// Collect answers from form pairs; the first occurrence of a key wins
    /// and unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "q1" => &mut form.q1,
                "q2" => &mut form.q2,
                "q3" => &mut form.q3,
                "emoji_score" => &mut form.emoji_score,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        form
    }

    pub fn into_assessment(self) -> Assessment {
        Assessment::from_raw(
            self.q1.as_deref(),
            self.q2.as_deref(),
            self.q3.as_deref(),
            self.emoji_score.as_deref(),
        )
    }

    pub fn score(self) -> MoodClassification {
        self.into_assessment().classify()
    }
}

/// Score raw answers. Never fails.
pub fn score(
    q1: Option<&str>,
    q2: Option<&str>,
    q3: Option<&str>,
    emoji_score: Option<&str>,
) -> MoodClassification {
    Assessment::from_raw(q1, q2, q3, emoji_score).classify()
}

/// Mood category; a closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Calm,
    Neutral,
    Stressed,
    Anxious,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Calm, Mood::Neutral, Mood::Stressed, Mood::Anxious];

    /// Bucket a combined score; thresholds are inclusive upper bounds
    pub fn from_combined(combined: i128) -> Self {
        if combined <= CALM_MAX {
            Mood::Calm
        } else if combined <= NEUTRAL_MAX {
            Mood::Neutral
        } else if combined <= STRESSED_MAX {
            Mood::Stressed
        } else {
            Mood::Anxious
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
            Mood::Stressed => "stressed",
            Mood::Anxious => "anxious",
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Mood::Calm => "You're doing well — keep it up!",
            Mood::Neutral => "A mixed day — that's okay",
            Mood::Stressed => "You're feeling stressed — be kind to yourself",
            Mood::Anxious => "High stress detected — reach out if needed",
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            Mood::Calm => {
                "Your answers point to a steady, balanced state. Keep doing what supports you."
            }
            Mood::Neutral => {
                "Some things feel fine and some don't. Take a short break and pick one small task."
            }
            Mood::Stressed => {
                "Stress is showing up today. Slow down, breathe, and drop what can wait."
            }
            Mood::Anxious => {
                "Your answers suggest a lot of strain. Talk to someone you trust or a professional."
            }
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Calm => "😊",
            Mood::Neutral => "🙂",
            Mood::Stressed => "😟",
            Mood::Anxious => "😣",
        }
    }

    pub fn style_tag(&self) -> &'static str {
        match self {
            Mood::Calm => "bg-calm",
            Mood::Neutral => "bg-neutral",
            Mood::Stressed => "bg-stressed",
            Mood::Anxious => "bg-anxious",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calm" => Ok(Mood::Calm),
            "neutral" => Ok(Mood::Neutral),
            "stressed" => Ok(Mood::Stressed),
            "anxious" => Ok(Mood::Anxious),
            other => Err(format!("Unknown mood: {}", other)),
        }
    }
}

/// Scored result with the fixed display fields of its mood
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodClassification {
    pub mood: Mood,
    /// Falls back to a string when it does not fit in an i64
    #[serde(serialize_with = "serialize_score")]
    pub combined_score: i128,
    pub headline: &'static str,
    pub body: &'static str,
    pub emoji: &'static str,
    pub style_tag: &'static str,
}

impl MoodClassification {
    fn new(mood: Mood, combined_score: i128) -> Self {
        Self {
            mood,
            combined_score,
            headline: mood.headline(),
            body: mood.body(),
            emoji: mood.emoji(),
            style_tag: mood.style_tag(),
        }
    }
}

fn serialize_score<S>(score: &i128, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match i64::try_from(*score) {
        Ok(small) => serializer.serialize_i64(small),
        Err(_) => serializer.collect_str(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(Mood::from_combined(10), Mood::Calm);
        assert_eq!(Mood::from_combined(11), Mood::Neutral);
        assert_eq!(Mood::from_combined(18), Mood::Neutral);
        assert_eq!(Mood::from_combined(19), Mood::Stressed);
        assert_eq!(Mood::from_combined(24), Mood::Stressed);
        assert_eq!(Mood::from_combined(25), Mood::Anxious);
        assert_eq!(Mood::from_combined(i128::MIN), Mood::Calm);
        assert_eq!(Mood::from_combined(i128::MAX), Mood::Anxious);
    }

    #[test]
    fn test_end_to_end_example() {
        let assessment = Assessment::new(8, 8, 2, 1);
        assert_eq!(assessment.stress_component(), 9);
        assert_eq!(assessment.raw_score(), 25);
        assert_eq!(assessment.emoji_offset(), 4);
        assert_eq!(assessment.combined_score(), 29);

        let result = assessment.classify();
        assert_eq!(result.mood, Mood::Anxious);
        assert_eq!(result.emoji, "😣");
        assert_eq!(result.style_tag, "bg-anxious");
    }

    #[test]
    fn test_defaults_are_neutral() {
        let result = Assessment::default().classify();
        assert_eq!(result.combined_score, 16);
        assert_eq!(result.mood, Mood::Neutral);
    }

    #[test]
    fn test_non_numeric_answer_uses_default() {
        let bad = score(Some("abc"), Some("5"), Some("5"), Some("3"));
        let good = score(Some("5"), Some("5"), Some("5"), Some("3"));
        assert_eq!(bad, good);
        assert_eq!(bad.combined_score, 16);
    }

    #[test]
    fn test_coerce_answer() {
        assert_eq!(coerce_answer(Some("7"), 5), 7);
        assert_eq!(coerce_answer(Some(" 7 "), 5), 7);
        assert_eq!(coerce_answer(Some("+7"), 5), 7);
        assert_eq!(coerce_answer(Some("-2"), 5), -2);
        assert_eq!(coerce_answer(Some(""), 5), 5);
        assert_eq!(coerce_answer(Some("7.5"), 5), 5);
        assert_eq!(coerce_answer(Some("1_0"), 5), 5);
        assert_eq!(coerce_answer(Some("99999999999999999999999"), 3), i64::MAX);
        assert_eq!(coerce_answer(Some(" -99999999999999999999999"), 3), i64::MIN);
        assert_eq!(coerce_answer(None, 3), 3);
    }

    #[test]
    fn test_emoji_offset() {
        assert_eq!(Assessment::new(5, 5, 5, 1).emoji_offset(), 4);
        assert_eq!(Assessment::new(5, 5, 5, 3).emoji_offset(), 0);
        assert_eq!(Assessment::new(5, 5, 5, 5).emoji_offset(), -4);
    }

    #[test]
    fn test_out_of_range_answers_are_scored() {
        // 100 + 100 + (11 - 0) - 0 = 211
        let result = Assessment::new(100, 100, 0, 3).classify();
        assert_eq!(result.combined_score, 211);
        assert_eq!(result.mood, Mood::Anxious);

        let extreme = Assessment::new(i64::MAX, i64::MAX, i64::MIN, i64::MIN).classify();
        assert_eq!(extreme.mood, Mood::Anxious);
    }

    #[test]
    fn test_form_from_pairs() {
        let form = AssessmentForm::from_pairs(vec![
            ("q1", "8"),
            ("q2", "8"),
            ("q3", "2"),
            ("emoji_score", "1"),
            ("q1", "1"),
            ("csrf", "ignored"),
        ]);
        assert_eq!(form.q1.as_deref(), Some("8"));
        assert_eq!(form.score().mood, Mood::Anxious);
    }

    #[test]
    fn test_form_missing_fields() {
        let form: AssessmentForm = serde_json::from_str(r#"{"q1": "oops"}"#).unwrap();
        assert_eq!(form.into_assessment(), Assessment::default());
    }

    #[test]
    fn test_oversized_literal_is_scored() {
        let result = score(Some("10000000000000000000000"), Some("5"), Some("5"), Some("3"));
        assert_eq!(result.mood, Mood::Anxious);
        assert_eq!(result.combined_score, i128::from(i64::MAX) + 11);

        let low = score(Some("5"), Some("5"), Some("10000000000000000000000"), Some("3"));
        assert_eq!(low.mood, Mood::Calm);
    }

    #[test]
    fn test_form_accepts_numeric_json() {
        let form: AssessmentForm =
            serde_json::from_str(r#"{"q1": 8, "q2": "8", "q3": 2, "emoji_score": 1}"#).unwrap();
        assert_eq!(form.q1.as_deref(), Some("8"));
        assert_eq!(form.score().combined_score, 29);
    }

    #[test]
    fn test_form_wrong_types_count_as_missing() {
        let form: AssessmentForm = serde_json::from_str(
            r#"{"q1": null, "q2": 7.5, "q3": [1, 2], "emoji_score": {"v": 1}, "extra": true}"#,
        )
        .unwrap();
        assert_eq!(form, AssessmentForm::default());
        assert_eq!(form.into_assessment(), Assessment::default());

        let negative: AssessmentForm = serde_json::from_str(r#"{"q3": -4}"#).unwrap();
        assert_eq!(negative.into_assessment().q3, -4);
    }

    #[test]
    fn test_mood_round_trips_through_str() {
        for mood in Mood::ALL {
            assert_eq!(mood.as_str().parse::<Mood>().unwrap(), mood);
        }
        assert!("elated".parse::<Mood>().is_err());
    }

    #[test]
    fn test_classification_serializes() {
        let result = Assessment::new(1, 1, 10, 5).classify();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mood"], "calm");
        assert_eq!(json["style_tag"], "bg-calm");
        assert_eq!(json["combined_score"], -1);
    }
}
