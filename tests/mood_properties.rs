//! Property tests for the mood scorer

use kalma_core::mood::{self, Assessment, AssessmentForm, Mood};
use proptest::prelude::*;

fn expected_mood(combined: i128) -> Mood {
    match combined {
        c if c <= 10 => Mood::Calm,
        c if c <= 18 => Mood::Neutral,
        c if c <= 24 => Mood::Stressed,
        _ => Mood::Anxious,
    }
}

proptest! {
    #[test]
    fn classification_is_one_of_four(q1: i64, q2: i64, q3: i64, emoji: i64) {
        let result = Assessment::new(q1, q2, q3, emoji).classify();
        prop_assert!(Mood::ALL.contains(&result.mood));
        prop_assert_eq!(result.headline, result.mood.headline());
        prop_assert_eq!(result.emoji, result.mood.emoji());
        prop_assert_eq!(result.style_tag, result.mood.style_tag());
    }

    #[test]
    fn scoring_is_deterministic(q1 in 1i64..=10, q2 in 1i64..=10, q3 in 1i64..=10, emoji in 1i64..=5) {
        let a = Assessment::new(q1, q2, q3, emoji).classify();
        let b = Assessment::new(q1, q2, q3, emoji).classify();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn combined_follows_formula(q1 in -1000i64..1000, q2 in -1000i64..1000, q3 in -1000i64..1000, emoji in -100i64..100) {
        let assessment = Assessment::new(q1, q2, q3, emoji);
        let expected = i128::from(q1 + q2 + (11 - q3) + (3 - emoji) * 2);
        prop_assert_eq!(assessment.combined_score(), expected);
        prop_assert_eq!(assessment.classify().mood, expected_mood(expected));
    }

    #[test]
    fn lower_q3_raises_combined_by_one(q1 in 1i64..=10, q2 in 1i64..=10, q3 in 2i64..=10, emoji in 1i64..=5) {
        let higher = Assessment::new(q1, q2, q3, emoji).combined_score();
        let lower = Assessment::new(q1, q2, q3 - 1, emoji).combined_score();
        prop_assert_eq!(lower - higher, 1);
    }

    #[test]
    fn string_answers_match_integer_answers(q1 in 1i64..=10, q2 in 1i64..=10, q3 in 1i64..=10, emoji in 1i64..=5) {
        let from_strings = mood::score(
            Some(&q1.to_string()),
            Some(&q2.to_string()),
            Some(&q3.to_string()),
            Some(&emoji.to_string()),
        );
        prop_assert_eq!(from_strings, Assessment::new(q1, q2, q3, emoji).classify());
    }

    #[test]
    fn non_numeric_answers_fall_back_to_defaults(
        junk in "[a-zA-Z .,!?]{0,12}",
        position in 0usize..4,
    ) {
        let mut answers = [Some("5"), Some("5"), Some("5"), Some("3")];
        answers[position] = Some(junk.as_str());

        let result = mood::score(answers[0], answers[1], answers[2], answers[3]);
        prop_assert_eq!(result.combined_score, 16);
        prop_assert_eq!(result.mood, Mood::Neutral);
    }

    #[test]
    fn missing_answers_fall_back_to_defaults(position in 0usize..4) {
        let mut answers = [Some("5"), Some("5"), Some("5"), Some("3")];
        answers[position] = None;

        let result = mood::score(answers[0], answers[1], answers[2], answers[3]);
        prop_assert_eq!(result.combined_score, 16);
    }

    #[test]
    fn padded_answers_match_plain_answers(
        q1 in 1i64..=10,
        q2 in 1i64..=10,
        q3 in 1i64..=10,
        emoji in 1i64..=5,
        pad in "[ \t]{0,3}",
    ) {
        let padded = |n: i64| format!("{pad}{n}{pad}");
        let result = AssessmentForm::from_pairs([
            ("q1", padded(q1)),
            ("q2", padded(q2)),
            ("q3", padded(q3)),
            ("emoji_score", padded(emoji)),
        ])
        .score();
        prop_assert_eq!(result, Assessment::new(q1, q2, q3, emoji).classify());
    }
}

#[test]
fn boundary_exactness() {
    // q1 + q2 + (11 - q3) with emoji_score = 3 (offset 0)
    let cases = [
        ((1, 1, 3), 10, Mood::Calm),
        ((1, 1, 2), 11, Mood::Neutral),
        ((4, 4, 1), 18, Mood::Neutral),
        ((4, 5, 1), 19, Mood::Stressed),
        ((7, 7, 1), 24, Mood::Stressed),
        ((7, 8, 1), 25, Mood::Anxious),
    ];

    for ((q1, q2, q3), combined, mood) in cases {
        let result = Assessment::new(q1, q2, q3, 3).classify();
        assert_eq!(result.combined_score, combined, "q=({q1},{q2},{q3})");
        assert_eq!(result.mood, mood, "combined={combined}");
    }
}

#[test]
fn emoji_offset_symmetry() {
    assert_eq!(Assessment::new(5, 5, 5, 1).emoji_offset(), 4);
    assert_eq!(Assessment::new(5, 5, 5, 3).emoji_offset(), 0);
    assert_eq!(Assessment::new(5, 5, 5, 5).emoji_offset(), -4);
}

#[test]
fn end_to_end_example() {
    let result = mood::score(Some("8"), Some("8"), Some("2"), Some("1"));
    assert_eq!(result.combined_score, 29);
    assert_eq!(result.mood, Mood::Anxious);
    assert_eq!(result.emoji, "😣");
    assert_eq!(result.headline, "High stress detected — reach out if needed");
}

#[test]
fn missing_form_fields_default() {
    let result = AssessmentForm::from_pairs(Vec::<(String, String)>::new()).score();
    assert_eq!(result.combined_score, 16);
    assert_eq!(result.mood, Mood::Neutral);
    assert_eq!(result.headline, "A mixed day — that's okay");
}

#[test]
fn mixed_missing_and_malformed_form_fields() {
    // q1 missing, q2 malformed, q3 padded, emoji out of range
    let result = AssessmentForm::from_pairs([("q2", "lots"), ("q3", " 2 "), ("emoji_score", "9")])
        .score();
    // 5 + 5 + (11 - 2) + (3 - 9) * 2 = 7
    assert_eq!(result.combined_score, 7);
    assert_eq!(result.mood, Mood::Calm);
}

#[test]
fn oversized_literal_is_still_scored() {
    let result = mood::score(Some("10000000000000000000000"), Some("5"), Some("5"), Some("3"));
    assert_eq!(result.mood, Mood::Anxious);
}
