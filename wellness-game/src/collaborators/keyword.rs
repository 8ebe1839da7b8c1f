use regex::Regex;

use super::{ChatResponder, Classification, Classifier, CollaboratorError};
use crate::catalog::ChatCfg;
use crate::state::{Sentiment, Tone};

/// Whole-word, case-insensitive matcher for a word list. `None` when the list is empty.
fn word_matcher(words: &[String]) -> Option<Regex> {
    if words.is_empty() {
        return None;
    }
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
        .map_err(|err| log::warn!("sentiment word list rejected: {err}"))
        .ok()
}

/// Labels text from the configured positive and negative word lists.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier {
    positive: Option<Regex>,
    negative: Option<Regex>,
}

impl KeywordClassifier {
    #[must_use]
    pub fn new(positive: &[String], negative: &[String]) -> Self {
        Self {
            positive: word_matcher(positive),
            negative: word_matcher(negative),
        }
    }

    #[must_use]
    pub fn from_config(chat: &ChatCfg) -> Self {
        Self::new(&chat.positive_words, &chat.negative_words)
    }

    /// Positive wins when both lists match.
    #[must_use]
    pub fn sentiment(&self, text: &str) -> Sentiment {
        let hit = |re: &Option<Regex>| re.as_ref().is_some_and(|re| re.is_match(text));
        if hit(&self.positive) {
            Sentiment::Positive
        } else if hit(&self.negative) {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    #[must_use]
    pub fn tone(text: &str) -> Tone {
        if text.contains('?') {
            Tone::Question
        } else if text.contains('!') {
            Tone::Urgent
        } else {
            Tone::Reflective
        }
    }

    /// Capitalised words that do not open a sentence.
    #[must_use]
    pub fn entities(text: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        let mut sentence_start = true;
        for raw in text.split_whitespace() {
            let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
            let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
            if starts_upper && !sentence_start && !found.iter().any(|f| f == word) {
                found.push(word.to_string());
            }
            if !word.is_empty() {
                sentence_start = false;
            }
            if raw.ends_with(['.', '!', '?']) {
                sentence_start = true;
            }
        }
        found
    }
}

impl Classifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Result<Classification, CollaboratorError> {
        Ok(Classification {
            sentiment: Some(self.sentiment(text)),
            tone: Some(Self::tone(text)),
            entities: Self::entities(text),
        })
    }
}

/// Scripted replies: greeting, question, or acknowledgement.
#[derive(Debug, Clone)]
pub struct RuleBasedResponder {
    greeting: String,
    question: String,
    acknowledgement: String,
}

impl RuleBasedResponder {
    #[must_use]
    pub fn from_config(chat: &ChatCfg) -> Self {
        Self {
            greeting: chat.greeting_reply.clone(),
            question: chat.question_reply.clone(),
            acknowledgement: chat.default_reply.clone(),
        }
    }
}

impl ChatResponder for RuleBasedResponder {
    fn reply(&self, text: &str) -> Result<String, CollaboratorError> {
        let lowered = text.to_lowercase();
        let reply = if lowered.contains("hello") {
            &self.greeting
        } else if lowered.contains('?') {
            &self.question
        } else {
            &self.acknowledgement
        };
        Ok(reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::JourneyConfig;

    fn classifier() -> KeywordClassifier {
        KeywordClassifier::from_config(&JourneyConfig::builtin().chat)
    }

    #[test]
    fn sentiment_matches_whole_words_only() {
        let c = classifier();
        assert_eq!(c.sentiment("I feel GOOD today"), Sentiment::Positive);
        assert_eq!(c.sentiment("so much stress lately"), Sentiment::Negative);
        assert_eq!(c.sentiment("goodness, a badge"), Sentiment::Neutral);
        assert_eq!(c.sentiment("good and bad both"), Sentiment::Positive);
    }

    #[test]
    fn negated_words_are_not_read_as_positive() {
        let c = classifier();
        assert_eq!(c.sentiment("I'm unhappy"), Sentiment::Negative);
        assert_eq!(c.sentiment("feeling unwell"), Sentiment::Neutral);
    }

    #[test]
    fn empty_word_lists_read_neutral() {
        let c = KeywordClassifier::new(&[], &[]);
        assert_eq!(c.sentiment("happy"), Sentiment::Neutral);
    }

    #[test]
    fn tone_prefers_question_then_urgent() {
        assert_eq!(KeywordClassifier::tone("why me?!"), Tone::Question);
        assert_eq!(KeywordClassifier::tone("help now!"), Tone::Urgent);
        assert_eq!(KeywordClassifier::tone("just thinking"), Tone::Reflective);
    }

    #[test]
    fn entities_skip_sentence_openers() {
        let found = KeywordClassifier::entities("Today I visited Mumbai with Priya. Then home.");
        assert_eq!(found, vec!["I", "Mumbai", "Priya"]);
        assert!(KeywordClassifier::entities("").is_empty());
    }

    #[test]
    fn responder_picks_reply_by_rule() {
        let cfg = JourneyConfig::builtin().chat;
        let r = RuleBasedResponder::from_config(&cfg);
        assert_eq!(r.reply("Hello there").unwrap(), cfg.greeting_reply);
        assert_eq!(r.reply("what now?").unwrap(), cfg.question_reply);
        assert_eq!(r.reply("a long day").unwrap(), cfg.default_reply);
    }
}
