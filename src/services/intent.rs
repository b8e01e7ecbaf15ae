// src/services/intent.rs
use super::llm::{ChatSession, LlmError};

pub const REFUSAL_REPLY: &str = "I apologize, but I can only help you find venues and locations. Please ask me about finding sports venues, restaurants, meeting places, or other locations!";

const REFUSAL_PHRASES: [&str; 2] = ["sorry", "can only help"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    VenueSearch,
    Unrelated,
}

/// Decides from the model's first reply whether the user asked about venues.
pub trait IntentClassifier: Send + Sync {
    fn classifies(&self, reply: &str) -> Intent;
}

/// Treats any reply mentioning a refusal phrase as "not about venues".
///
/// A genuine answer that happens to say "sorry" is misclassified too.
#[derive(Debug, Default, Clone, Copy)]
pub struct RefusalPhraseClassifier;

impl IntentClassifier for RefusalPhraseClassifier {
    fn classifies(&self, reply: &str) -> Intent {
        let reply_lower = reply.to_lowercase();
        if REFUSAL_PHRASES.iter().any(|phrase| reply_lower.contains(phrase)) {
            Intent::Unrelated
        } else {
            Intent::VenueSearch
        }
    }
}

pub fn intent_prompt(message: &str) -> String {
    format!(
        r#"You are a venue finder assistant. Help the user find venues based on their query:
"{message}"

If this is not a venue-related query, politely inform the user that you can only help with venue-related questions.
If it is a venue query, extract the location and type of venue they're looking for."#
    )
}

/// Opens the conversation with the intent prompt and classifies the answer.
pub async fn classify_intent(
    chat: &mut ChatSession<'_>,
    classifier: &dyn IntentClassifier,
    message: &str,
) -> Result<Intent, LlmError> {
    let reply = chat.send_message(intent_prompt(message)).await?;
    Ok(classifier.classifies(&reply))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusal_phrases_mark_unrelated() {
        let c = RefusalPhraseClassifier;
        assert_eq!(c.classifies("Sorry, I can't do that."), Intent::Unrelated);
        assert_eq!(
            c.classifies("I CAN ONLY HELP with venues."),
            Intent::Unrelated
        );
        assert_eq!(
            c.classifies("Sure! You want a basketball court in Boston."),
            Intent::VenueSearch
        );
    }

    #[test]
    fn apologetic_venue_answer_is_still_unrelated() {
        let c = RefusalPhraseClassifier;
        assert_eq!(
            c.classifies("I'm sorry, only 2 venues matched"),
            Intent::Unrelated
        );
    }

    #[test]
    fn prompt_quotes_the_message() {
        let prompt = intent_prompt("gym in Austin");
        assert!(prompt.contains("\"gym in Austin\""));
        assert!(prompt.starts_with("You are a venue finder assistant."));
    }
}
