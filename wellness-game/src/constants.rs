//! Centralized thresholds and notice keys for the journey core.
//!
//! Values that gate progression live here rather than in the JSON catalog so
//! that unlocking rules can only change through reviewed code.

// Progression ---------------------------------------------------------------
pub const MANSION_CREDIT_THRESHOLD: u32 = 3;
pub const MIN_CHAT_INPUT_CHARS: usize = 5;
pub const MOOD_TRACKER_WINDOW: usize = 5;
pub const CAR_PUZZLE_CREDIT: u32 = 1;

// Sampling ------------------------------------------------------------------
pub(crate) const MIN_SAMPLE_SIZE: usize = 3;
pub(crate) const MAX_SAMPLE_SIZE: usize = 4;

// Story canvas --------------------------------------------------------------
pub(crate) const STORY_CANVAS_WIDTH: u32 = 1280;
pub(crate) const STORY_CANVAS_HEIGHT: u32 = 720;
pub(crate) const STORY_CANVAS_MARGIN: u32 = 100;
pub(crate) const STORY_FONT_SIZE: u32 = 30;
pub(crate) const STORY_LINE_HEIGHT: u32 = 42;
pub(crate) const STORY_BACKGROUND: &str = "#121825";
pub(crate) const STORY_TEXT_COLOR: &str = "#ffffff";
// Average glyph advance in percent of the font size, used for wrapping.
pub(crate) const STORY_GLYPH_ADVANCE_PCT: u32 = 52;
pub(crate) const STORY_LINE_FADE_MS: u32 = 1200;

// Notice keys ---------------------------------------------------------------
pub const NOTICE_GAME_FOUND: &str = "notice.game.found";
pub const NOTICE_CAR_CORRECT: &str = "notice.car.correct";
pub const NOTICE_CAR_WRONG: &str = "notice.car.wrong";
pub const NOTICE_CREDITS: &str = "notice.credits";
pub const NOTICE_NO_CHALLENGE: &str = "notice.game.no-challenge";
pub const NOTICE_CHAT_TOO_SHORT: &str = "notice.chat.too-short";
pub const NOTICE_GATE_LOCKED: &str = "notice.gate.locked";
pub const NOTICE_TRANSCRIBED: &str = "notice.reflection.transcribed";
pub const NOTICE_TRANSCRIBE_EMPTY: &str = "notice.reflection.transcribe-empty";
pub const NOTICE_NO_REFLECTION: &str = "notice.mansion.no-reflection";
pub const NOTICE_STORY_DONE: &str = "notice.mansion.story-done";
pub const NOTICE_STORY_FAILED: &str = "notice.mansion.story-failed";
pub const NOTICE_RESTARTED: &str = "notice.journey.restarted";
pub const NOTICE_IGNORED: &str = "notice.action.ignored";
