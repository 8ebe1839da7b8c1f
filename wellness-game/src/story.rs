//! Closing narrative for the mansion page.
use std::fmt::Write as _;

use thiserror::Error;

use crate::catalog::{JourneyConfig, StoryVariant};
use crate::collaborators::{CollaboratorError, NarrativeRenderer};
use crate::constants::{
    STORY_BACKGROUND, STORY_CANVAS_HEIGHT, STORY_CANVAS_MARGIN, STORY_CANVAS_WIDTH,
    STORY_FONT_SIZE, STORY_GLYPH_ADVANCE_PCT, STORY_LINE_FADE_MS, STORY_LINE_HEIGHT,
    STORY_TEXT_COLOR,
};
use crate::state::SessionState;

const REFLECTION_SLOT: &str = "{reflection}";
pub const SVG_MIME: &str = "image/svg+xml";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoryError {
    #[error("no reflection to tell a story about")]
    EmptyReflection,
    #[error(transparent)]
    Render(CollaboratorError),
}

/// A rendered story ready to be shown once and then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNarrative {
    pub variant: StoryVariant,
    pub mime: String,
    pub bytes: Vec<u8>,
    /// Plain text of the story, for screen readers.
    pub alt_text: String,
}

/// Fill the story template with the reflection, verbatim.
#[must_use]
pub fn compose_story(reflection: &str, config: &JourneyConfig) -> String {
    config.story.template.replace(REFLECTION_SLOT, reflection)
}

/// Greedy word wrap. Existing line breaks are kept; a word longer than
/// `max_chars` gets a line of its own.
#[must_use]
pub fn wrap_lines(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0usize;
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if current_len > 0 && current_len + 1 + word_len > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }
        lines.push(current);
    }
    lines
}

/// Characters that fit across the canvas once the margin is taken off.
#[must_use]
pub const fn canvas_line_chars() -> usize {
    let usable = STORY_CANVAS_WIDTH - STORY_CANVAS_MARGIN;
    (usable * 100 / (STORY_FONT_SIZE * STORY_GLYPH_ADVANCE_PCT)) as usize
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the story as centred white text on a dark 1280x720 SVG canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgStoryRenderer {
    variant: StoryVariant,
}

impl SvgStoryRenderer {
    #[must_use]
    pub const fn new(variant: StoryVariant) -> Self {
        Self { variant }
    }

    #[must_use]
    pub fn to_svg(&self, story: &str) -> String {
        let lines = wrap_lines(story, canvas_line_chars());
        let count = u32::try_from(lines.len()).unwrap_or(u32::MAX);
        let top = STORY_CANVAS_HEIGHT.saturating_sub(count.saturating_mul(STORY_LINE_HEIGHT)) / 2;
        let center = STORY_CANVAS_WIDTH / 2;

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{STORY_CANVAS_WIDTH}" height="{STORY_CANVAS_HEIGHT}" viewBox="0 0 {STORY_CANVAS_WIDTH} {STORY_CANVAS_HEIGHT}">"#
        );
        let _ = write!(
            svg,
            r#"<rect width="100%" height="100%" fill="{STORY_BACKGROUND}"/>"#
        );
        let mut shown = 0u32;
        for (idx, line) in (0u32..).zip(&lines) {
            if line.is_empty() {
                continue;
            }
            let y = top + idx * STORY_LINE_HEIGHT + STORY_FONT_SIZE;
            let text = escape_xml(line);
            match self.variant {
                StoryVariant::Still => {
                    let _ = write!(
                        svg,
                        r#"<text x="{center}" y="{y}" fill="{STORY_TEXT_COLOR}" font-size="{STORY_FONT_SIZE}" font-family="sans-serif" text-anchor="middle">{text}</text>"#
                    );
                }
                StoryVariant::Animated => {
                    let begin = shown * STORY_LINE_FADE_MS;
                    let _ = write!(
                        svg,
                        r#"<text x="{center}" y="{y}" fill="{STORY_TEXT_COLOR}" font-size="{STORY_FONT_SIZE}" font-family="sans-serif" text-anchor="middle" opacity="0">{text}<animate attributeName="opacity" from="0" to="1" begin="{begin}ms" dur="{STORY_LINE_FADE_MS}ms" fill="freeze"/></text>"#
                    );
                }
            }
            shown += 1;
        }
        svg.push_str("</svg>");
        svg
    }
}

impl NarrativeRenderer for SvgStoryRenderer {
    fn render(&self, story: &str) -> Result<RenderedNarrative, CollaboratorError> {
        Ok(RenderedNarrative {
            variant: self.variant,
            mime: SVG_MIME.to_string(),
            bytes: self.to_svg(story).into_bytes(),
            alt_text: story.to_string(),
        })
    }
}

/// Compose and render the closing story from the stored reflection.
///
/// # Errors
///
/// Returns [`StoryError::EmptyReflection`] without calling the renderer when
/// nothing has been reflected yet, and [`StoryError::Render`] when the
/// renderer fails.
pub fn render_story(
    state: &SessionState,
    renderer: &dyn NarrativeRenderer,
    config: &JourneyConfig,
) -> Result<RenderedNarrative, StoryError> {
    if !state.has_reflection() {
        return Err(StoryError::EmptyReflection);
    }
    let story = compose_story(state.reflection_original.trim(), config);
    let rendered = renderer.render(&story).map_err(StoryError::Render)?;
    log::info!("story rendered ({} bytes, {})", rendered.bytes.len(), rendered.mime);
    Ok(rendered)
}
