//! Sending a reflection to the chat companion.
use chrono::NaiveDateTime;

use crate::catalog::{ChatCfg, InputRetention, JourneyConfig};
use crate::collaborators::{Classification, Collaborators, SpeechClip};
use crate::constants::MIN_CHAT_INPUT_CHARS;
use crate::error::ValidationRejected;
use crate::state::{ChatLine, MoodEntry, SessionState};

/// Result of an accepted send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    pub reply: String,
    pub crisis: bool,
    /// The responder failed and the acknowledgement reply was used instead.
    pub fell_back: bool,
    pub classification: Classification,
    pub speech: Option<SpeechClip>,
}

/// Case-insensitive substring check against the configured crisis phrases.
#[must_use]
pub fn contains_crisis_phrase(text: &str, chat: &ChatCfg) -> bool {
    let lowered = text.to_lowercase();
    chat.crisis_phrases
        .iter()
        .any(|phrase| lowered.contains(phrase.as_str()))
}

/// Send the composed reflection.
///
/// # Errors
///
/// Returns [`ValidationRejected::TooShort`] when the trimmed input is shorter
/// than five characters; the session is untouched in that case.
pub fn send_reflection(
    state: &mut SessionState,
    collaborators: &Collaborators,
    config: &JourneyConfig,
    now: NaiveDateTime,
) -> Result<ChatOutcome, ValidationRejected> {
    let input = state.reflection_current.trim().to_string();
    let len = input.chars().count();
    if len < MIN_CHAT_INPUT_CHARS {
        return Err(ValidationRejected::TooShort {
            min: MIN_CHAT_INPUT_CHARS,
            len,
        });
    }
    let chat = &config.chat;

    let classification = collaborators
        .classifier
        .classify(&input)
        .unwrap_or_else(|err| {
            log::warn!("classifier unavailable, mood left unlabeled: {err}");
            Classification::default()
        });

    let crisis = contains_crisis_phrase(&input, chat);
    let mut fell_back = false;
    let reply = if crisis {
        log::info!("crisis phrase detected, sending safety message");
        chat.safety_message.clone()
    } else {
        collaborators.responder.reply(&input).unwrap_or_else(|err| {
            log::warn!("chat responder failed, using default reply: {err}");
            fell_back = true;
            chat.default_reply.clone()
        })
    };

    state.chat_history.push(ChatLine::user(input.clone()));
    state.chat_history.push(ChatLine::bot(reply.clone()));
    state.mood_log.push(MoodEntry {
        timestamp: now,
        text: input,
        sentiment: classification.sentiment,
        tone: classification.tone,
    });
    if chat.input_retention == InputRetention::Clear {
        state.reflection_current.clear();
    }

    let speech = if chat.speak_replies {
        collaborators
            .synthesizer
            .synthesize(&reply)
            .map_err(|err| log::debug!("no audio for reply: {err}"))
            .ok()
    } else {
        None
    };

    Ok(ChatOutcome {
        reply,
        crisis,
        fell_back,
        classification,
        speech,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{
        ChatResponder, Classifier, CollaboratorError, SpeechSynthesizer,
    };
    use crate::state::{Sentiment, Speaker};
    use chrono::NaiveDate;

    struct Broken;

    impl ChatResponder for Broken {
        fn reply(&self, _text: &str) -> Result<String, CollaboratorError> {
            Err(CollaboratorError::Unavailable("chat"))
        }
    }

    impl Classifier for Broken {
        fn classify(&self, _text: &str) -> Result<Classification, CollaboratorError> {
            Err(CollaboratorError::Unavailable("classifier"))
        }
    }

    struct Beep;

    impl SpeechSynthesizer for Beep {
        fn synthesize(&self, text: &str) -> Result<SpeechClip, CollaboratorError> {
            Ok(SpeechClip {
                mime: "audio/mpeg".into(),
                bytes: text.as_bytes().to_vec(),
            })
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 2)
            .and_then(|d| d.and_hms_opt(18, 0, 0))
            .unwrap()
    }

    fn composed(text: &str) -> SessionState {
        SessionState {
            reflection_current: text.into(),
            reflection_original: text.into(),
            ..SessionState::default()
        }
    }

    #[test]
    fn short_input_is_rejected_without_mutation() {
        let cfg = JourneyConfig::builtin();
        let collab = Collaborators::offline(&cfg);
        let mut state = composed("  hey ");
        let before = state.clone();
        let err = send_reflection(&mut state, &collab, &cfg, now()).unwrap_err();
        assert_eq!(err, ValidationRejected::TooShort { min: 5, len: 3 });
        assert_eq!(state, before);
    }

    #[test]
    fn crisis_phrase_wins_even_when_responder_is_down() {
        let cfg = JourneyConfig::builtin();
        let collab = Collaborators::offline(&cfg)
            .with_responder(Broken)
            .with_classifier(Broken);
        let mut state = composed("I feel HOPELESS today");
        let outcome = send_reflection(&mut state, &collab, &cfg, now()).unwrap();
        assert!(outcome.crisis);
        assert!(!outcome.fell_back);
        assert_eq!(outcome.reply, cfg.chat.safety_message);
        assert_eq!(state.mood_log[0].sentiment, None);
    }

    #[test]
    fn accepted_send_appends_history_and_mood() {
        let cfg = JourneyConfig::builtin();
        let collab = Collaborators::offline(&cfg);
        let mut state = composed("a good walk today");
        let outcome = send_reflection(&mut state, &collab, &cfg, now()).unwrap();
        assert_eq!(outcome.reply, cfg.chat.default_reply);
        assert_eq!(state.chat_history.len(), 2);
        assert_eq!(state.chat_history[0].speaker, Speaker::User);
        assert_eq!(state.chat_history[1].speaker, Speaker::Bot);
        assert_eq!(state.mood_log.len(), 1);
        assert_eq!(state.mood_log[0].sentiment, Some(Sentiment::Positive));
        assert!(state.reflection_current.is_empty());
        assert_eq!(state.reflection_original, "a good walk today");
        assert!(outcome.speech.is_none());
    }

    #[test]
    fn responder_failure_uses_default_reply() {
        let cfg = JourneyConfig::builtin();
        let collab = Collaborators::offline(&cfg).with_responder(Broken);
        let mut state = composed("Hello, long week");
        let outcome = send_reflection(&mut state, &collab, &cfg, now()).unwrap();
        assert!(outcome.fell_back);
        assert_eq!(outcome.reply, cfg.chat.default_reply);
    }

    #[test]
    fn retained_input_and_spoken_reply() {
        let mut cfg = JourneyConfig::builtin();
        cfg.chat.input_retention = InputRetention::Retain;
        cfg.chat.speak_replies = true;
        let collab = Collaborators::offline(&cfg).with_synthesizer(Beep);
        let mut state = composed("what should I do?");
        let outcome = send_reflection(&mut state, &collab, &cfg, now()).unwrap();
        assert_eq!(state.reflection_current, "what should I do?");
        assert_eq!(outcome.reply, cfg.chat.question_reply);
        assert_eq!(outcome.speech.map(|s| s.mime), Some("audio/mpeg".into()));
    }

    #[test]
    fn failed_speech_is_silently_dropped() {
        let mut cfg = JourneyConfig::builtin();
        cfg.chat.speak_replies = true;
        let collab = Collaborators::offline(&cfg);
        let mut state = composed("quiet evening");
        let outcome = send_reflection(&mut state, &collab, &cfg, now()).unwrap();
        assert!(outcome.speech.is_none());
        assert_eq!(state.chat_history.len(), 2);
    }
}
