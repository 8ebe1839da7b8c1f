use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::MANSION_CREDIT_THRESHOLD;
use crate::games::{GameChallenge, GameKind};

const MOOD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Pages the router knows how to render.
///
/// Serialized as its lowercase key. Any key that does not name a page reads
/// back as [`PageId::Home`], so stale or tampered snapshots land on the start
/// page instead of failing to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PageId {
    #[default]
    Home,
    Train,
    Car,
    Bus,
    Mansion,
}

impl PageId {
    pub const ALL: [Self; 5] = [Self::Home, Self::Train, Self::Car, Self::Bus, Self::Mansion];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Train => "train",
            Self::Car => "car",
            Self::Bus => "bus",
            Self::Mansion => "mansion",
        }
    }

    /// Resolve a page key, falling back to [`PageId::Home`] for anything unknown.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }

    /// The mini-game hosted on this page, if any.
    #[must_use]
    pub const fn game(self) -> Option<GameKind> {
        match self {
            Self::Train => Some(GameKind::Train),
            Self::Car => Some(GameKind::Car),
            Self::Bus => Some(GameKind::Bus),
            Self::Home | Self::Mansion => None,
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PageId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(Self::Home),
            "train" => Ok(Self::Train),
            "car" => Ok(Self::Car),
            "bus" => Ok(Self::Bus),
            "mansion" => Ok(Self::Mansion),
            _ => Err(()),
        }
    }
}

impl From<String> for PageId {
    fn from(value: String) -> Self {
        Self::from_key(&value)
    }
}

impl From<PageId> for String {
    fn from(value: PageId) -> Self {
        value.key().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLine {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatLine {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Question,
    Urgent,
    Reflective,
}

impl Tone {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Urgent => "urgent",
            Self::Reflective => "reflective",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One accepted chat submission, as shown in the mood tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub timestamp: NaiveDateTime,
    pub text: String,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub tone: Option<Tone>,
}

impl MoodEntry {
    #[must_use]
    pub fn time_label(&self) -> String {
        self.timestamp.format(MOOD_TIME_FORMAT).to_string()
    }

    /// Sentiment label for display; missing labels read as "unlabeled".
    #[must_use]
    pub fn sentiment_label(&self) -> &'static str {
        self.sentiment.map_or("unlabeled", Sentiment::as_str)
    }

    #[must_use]
    pub fn tone_label(&self) -> &'static str {
        self.tone.map_or("unlabeled", Tone::as_str)
    }
}

/// The whole journey: every page reads and writes this one value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub page: PageId,
    pub credits: u32,
    pub reflection_current: String,
    pub reflection_original: String,
    pub chat_history: Vec<ChatLine>,
    pub mood_log: Vec<MoodEntry>,
    /// Challenge for the game page currently shown; `None` off game pages.
    pub challenge: Option<GameChallenge>,
    pub hints_revealed: bool,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every field back to its default in one assignment.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Add earned credits. Credits only grow until the next reset.
    pub fn add_credits(&mut self, earned: u32) -> u32 {
        self.credits = self.credits.saturating_add(earned);
        self.credits
    }

    #[must_use]
    pub const fn mansion_unlocked(&self) -> bool {
        crate::gate::can_enter_mansion(self.credits)
    }

    #[must_use]
    pub const fn credits_to_unlock(&self) -> u32 {
        MANSION_CREDIT_THRESHOLD.saturating_sub(self.credits)
    }

    /// Newest mood entries first, at most `limit` of them.
    pub fn recent_moods(&self, limit: usize) -> impl Iterator<Item = &MoodEntry> {
        self.mood_log.iter().rev().take(limit)
    }

    #[must_use]
    pub fn has_reflection(&self) -> bool {
        !self.reflection_original.trim().is_empty()
    }
}
