//! Mood self-assessment command

use anyhow::Result;
use kalma_core::{AssessmentForm, MoodClassification};
use tracing::debug;

use super::helpers::print_json;

/// Score the questionnaire and print the result
///
/// Answers are passed through as raw strings so that malformed values fall
/// back to the neutral defaults exactly like a submitted form would.
pub fn handle(form: AssessmentForm, json: bool) -> Result<()> {
    let result = form.score();
    debug!(
        "Assessment scored {} -> {}",
        result.combined_score, result.mood
    );

    if json {
        return print_json(&result);
    }

    println!("{}", render(&result));
    Ok(())
}

fn render(result: &MoodClassification) -> String {
    format!(
        "{} {}\n\n{}\n\nMood: {} (score {}, style {})",
        result.emoji,
        result.headline,
        result.body,
        result.mood,
        result.combined_score,
        result.style_tag
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kalma_core::mood;

    #[test]
    fn test_render_contains_display_fields() {
        let result = mood::score(Some("8"), Some("8"), Some("2"), Some("1"));
        let text = render(&result);
        assert!(text.starts_with("😣 High stress detected"));
        assert!(text.contains("Mood: anxious (score 29, style bg-anxious)"));
    }
}
