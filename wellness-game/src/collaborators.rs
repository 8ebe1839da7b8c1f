//! Narrow interfaces to the services the journey leans on.
//!
//! Every call returns a `Result`; callers pick the fallback value themselves.
pub mod keyword;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::JourneyConfig;
use crate::state::{Sentiment, Tone};
use crate::story::{RenderedNarrative, SvgStoryRenderer};

pub use keyword::{KeywordClassifier, RuleBasedResponder};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    #[error("{0} is not available")]
    Unavailable(&'static str),
    #[error("{service} failed: {reason}")]
    Failed {
        service: &'static str,
        reason: String,
    },
}

impl CollaboratorError {
    #[must_use]
    pub fn failed(service: &'static str, reason: impl Into<String>) -> Self {
        Self::Failed {
            service,
            reason: reason.into(),
        }
    }
}

/// Labels produced for a piece of text. Each part may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
    pub sentiment: Option<Sentiment>,
    pub tone: Option<Tone>,
    pub entities: Vec<String>,
}

/// Encoded audio for a spoken reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechClip {
    pub mime: String,
    pub bytes: Vec<u8>,
}

pub trait Transcriber {
    /// Whether a recording control should be offered at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Turn recorded audio into text.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is missing or rejects the audio.
    fn transcribe(&self, audio: &[u8]) -> Result<String, CollaboratorError>;
}

pub trait Classifier {
    /// Label sentiment, tone and named entities.
    ///
    /// # Errors
    ///
    /// Returns an error if the classifier cannot run.
    fn classify(&self, text: &str) -> Result<Classification, CollaboratorError>;
}

pub trait ChatResponder {
    /// Produce a reply for the user's reflection.
    ///
    /// # Errors
    ///
    /// Returns an error if no reply could be produced.
    fn reply(&self, text: &str) -> Result<String, CollaboratorError>;
}

pub trait SpeechSynthesizer {
    /// Speak `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if synthesis is unavailable or fails.
    fn synthesize(&self, text: &str) -> Result<SpeechClip, CollaboratorError>;
}

pub trait NarrativeRenderer {
    /// Render the closing story to an image or animation.
    ///
    /// # Errors
    ///
    /// Returns an error if the story cannot be rendered.
    fn render(&self, story: &str) -> Result<RenderedNarrative, CollaboratorError>;
}

/// Transcriber for builds that ship without a speech backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableTranscriber;

impl Transcriber for UnavailableTranscriber {
    fn is_available(&self) -> bool {
        false
    }

    fn transcribe(&self, _audio: &[u8]) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::Unavailable("transcription"))
    }
}

/// Synthesizer that never produces audio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSynthesizer;

impl SpeechSynthesizer for SilentSynthesizer {
    fn synthesize(&self, _text: &str) -> Result<SpeechClip, CollaboratorError> {
        Err(CollaboratorError::Unavailable("speech synthesis"))
    }
}

/// Every collaborator the journey talks to, boxed so callers can swap any one.
pub struct Collaborators {
    pub transcriber: Box<dyn Transcriber>,
    pub classifier: Box<dyn Classifier>,
    pub responder: Box<dyn ChatResponder>,
    pub synthesizer: Box<dyn SpeechSynthesizer>,
    pub renderer: Box<dyn NarrativeRenderer>,
}

impl Collaborators {
    /// Collaborators that run entirely in-process: keyword labels, rule-based
    /// replies, SVG story rendering, and no speech in either direction.
    #[must_use]
    pub fn offline(config: &JourneyConfig) -> Self {
        Self {
            transcriber: Box::new(UnavailableTranscriber),
            classifier: Box::new(KeywordClassifier::from_config(&config.chat)),
            responder: Box::new(RuleBasedResponder::from_config(&config.chat)),
            synthesizer: Box::new(SilentSynthesizer),
            renderer: Box::new(SvgStoryRenderer::new(config.story.variant)),
        }
    }

    #[must_use]
    pub fn with_transcriber(mut self, transcriber: impl Transcriber + 'static) -> Self {
        self.transcriber = Box::new(transcriber);
        self
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Classifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    #[must_use]
    pub fn with_responder(mut self, responder: impl ChatResponder + 'static) -> Self {
        self.responder = Box::new(responder);
        self
    }

    #[must_use]
    pub fn with_synthesizer(mut self, synthesizer: impl SpeechSynthesizer + 'static) -> Self {
        self.synthesizer = Box::new(synthesizer);
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: impl NarrativeRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("transcriber_available", &self.transcriber.is_available())
            .finish_non_exhaustive()
    }
}
