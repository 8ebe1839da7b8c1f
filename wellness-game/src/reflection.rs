//! Merging typed and transcribed reflections into the session.
use crate::collaborators::Transcriber;
use crate::state::SessionState;

/// Where a reflection came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectionSource {
    Typed(String),
    Transcript(String),
}

impl ReflectionSource {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Typed(text) | Self::Transcript(text) => text,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Typed(_) => "typed",
            Self::Transcript(_) => "transcript",
        }
    }
}

/// Apply the latest reflection. Blank input leaves both reflection fields alone.
///
/// Returns whether the session changed.
pub fn merge_reflection(state: &mut SessionState, source: &ReflectionSource) -> bool {
    let text = source.text().trim();
    if text.is_empty() {
        return false;
    }
    state.reflection_current = text.to_string();
    state.reflection_original = text.to_string();
    log::debug!("reflection merged from {}", source.label());
    true
}

/// Transcribe a recording and merge the result. A failed transcription counts
/// as an empty transcript.
pub fn accept_recording(
    state: &mut SessionState,
    transcriber: &dyn Transcriber,
    audio: &[u8],
) -> bool {
    let transcript = transcriber.transcribe(audio).unwrap_or_else(|err| {
        log::warn!("transcription fell back to empty text: {err}");
        String::new()
    });
    merge_reflection(state, &ReflectionSource::Transcript(transcript))
}
