//! Collaborator stand-ins for outage and voice scenarios.
use wellness_game::{
    ChatResponder, Classification, Classifier, CollaboratorError, NarrativeRenderer,
    RenderedNarrative, Transcriber,
};

/// Returns the same transcript for every clip.
#[derive(Debug, Clone)]
pub struct ScriptedTranscriber(pub String);

impl Transcriber for ScriptedTranscriber {
    fn transcribe(&self, _audio: &[u8]) -> Result<String, CollaboratorError> {
        Ok(self.0.clone())
    }
}

/// Every call fails as if the backing service were down.
#[derive(Debug, Clone, Copy, Default)]
pub struct Outage;

impl Outage {
    fn error(service: &'static str) -> CollaboratorError {
        CollaboratorError::failed(service, "service unreachable")
    }
}

impl Classifier for Outage {
    fn classify(&self, _text: &str) -> Result<Classification, CollaboratorError> {
        Err(Self::error("classifier"))
    }
}

impl ChatResponder for Outage {
    fn reply(&self, _text: &str) -> Result<String, CollaboratorError> {
        Err(Self::error("chat"))
    }
}

impl NarrativeRenderer for Outage {
    fn render(&self, _story: &str) -> Result<RenderedNarrative, CollaboratorError> {
        Err(Self::error("renderer"))
    }
}
