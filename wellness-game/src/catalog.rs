//! Journey configuration: game catalogs, chat phrases, and story settings.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{MAX_SAMPLE_SIZE, MIN_SAMPLE_SIZE};

const DEFAULT_JOURNEY_DATA: &str =
    include_str!("../../wellness-web/static/assets/data/journey.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("journey config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog `{0}` has no usable items")]
    EmptyCatalog(&'static str),
}

/// Whether a game keeps its challenge after a check or draws a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintPolicy {
    /// Keep the same challenge until the player leaves the page.
    Persist,
    /// Draw a fresh challenge after every check.
    #[default]
    Regenerate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintDisplay {
    #[default]
    Always,
    OnRequest,
}

/// What happens to the composed reflection after a successful send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputRetention {
    #[default]
    Clear,
    Retain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryVariant {
    /// A single still image, discarded once shown.
    #[default]
    Still,
    /// Lines fade in one after another.
    Animated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub answer: String,
    pub hint: String,
}

impl CatalogItem {
    #[must_use]
    pub fn new(answer: &str, hint: &str) -> Self {
        Self {
            answer: answer.to_string(),
            hint: hint.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordHuntCfg {
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    #[serde(default)]
    pub hint_display: HintDisplay,
    pub items: Vec<CatalogItem>,
}

impl WordHuntCfg {
    /// Sample size clamped to 3..=4 and to what the catalog can supply.
    #[must_use]
    pub fn effective_sample_size(&self) -> usize {
        self.sample_size
            .clamp(MIN_SAMPLE_SIZE, MAX_SAMPLE_SIZE)
            .min(self.items.len())
    }
}

const fn default_sample_size() -> usize {
    MIN_SAMPLE_SIZE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleCfg {
    pub puzzles: Vec<CatalogItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCatalog {
    pub train: WordHuntCfg,
    pub bus: WordHuntCfg,
    pub car: PuzzleCfg,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCfg {
    pub crisis_phrases: Vec<String>,
    pub safety_message: String,
    pub greeting_reply: String,
    pub question_reply: String,
    pub default_reply: String,
    #[serde(default)]
    pub positive_words: Vec<String>,
    #[serde(default)]
    pub negative_words: Vec<String>,
    #[serde(default)]
    pub input_retention: InputRetention,
    #[serde(default)]
    pub speak_replies: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryCfg {
    pub template: String,
    #[serde(default)]
    pub variant: StoryVariant,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageImages {
    pub home: Option<String>,
    pub train: Option<String>,
    pub bus: Option<String>,
    pub car: Option<String>,
    pub mansion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyConfig {
    #[serde(default)]
    pub hint_policy: HintPolicy,
    pub games: GameCatalog,
    pub chat: ChatCfg,
    pub story: StoryCfg,
    #[serde(default)]
    pub images: PageImages,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self::from_json(DEFAULT_JOURNEY_DATA).unwrap_or_else(|err| {
            log::warn!("embedded journey config rejected ({err}); using built-in catalog");
            Self::builtin()
        })
    }
}

impl JourneyConfig {
    /// Parse and normalize a journey config.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a game catalog ends up empty.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let parsed: Self = serde_json::from_str(json)?;
        parsed.normalized()
    }

    /// Load the config bundled with the web assets.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::default()
    }

    /// Lowercase and trim answers, lowercase phrase lists, and drop blank items.
    ///
    /// # Errors
    ///
    /// Returns an error if any game catalog has no usable items left.
    pub fn normalized(mut self) -> Result<Self, ConfigError> {
        normalize_items(&mut self.games.train.items);
        normalize_items(&mut self.games.bus.items);
        normalize_items(&mut self.games.car.puzzles);
        if self.games.train.items.is_empty() {
            return Err(ConfigError::EmptyCatalog("train"));
        }
        if self.games.bus.items.is_empty() {
            return Err(ConfigError::EmptyCatalog("bus"));
        }
        if self.games.car.puzzles.is_empty() {
            return Err(ConfigError::EmptyCatalog("car"));
        }
        normalize_phrases(&mut self.chat.crisis_phrases);
        normalize_phrases(&mut self.chat.positive_words);
        normalize_phrases(&mut self.chat.negative_words);
        Ok(self)
    }

    /// Compiled-in catalog used when the bundled asset cannot be read.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            hint_policy: HintPolicy::Regenerate,
            games: GameCatalog {
                train: WordHuntCfg {
                    sample_size: 3,
                    hint_display: HintDisplay::Always,
                    items: vec![
                        CatalogItem::new("butterfly", "A small creature with wings"),
                        CatalogItem::new("wheel", "Round part found on vehicles"),
                        CatalogItem::new("horseshoe", "Lucky, horse related"),
                    ],
                },
                bus: WordHuntCfg {
                    sample_size: 3,
                    hint_display: HintDisplay::OnRequest,
                    items: vec![
                        CatalogItem::new("route", "From bottom, line 6"),
                        CatalogItem::new("driver", "Top, line 3"),
                        CatalogItem::new("ticket", "Center, line 8"),
                    ],
                },
                car: PuzzleCfg {
                    puzzles: vec![
                        CatalogItem::new("piano", "What has keys but can't open locks?"),
                        CatalogItem::new(
                            "candle",
                            "I'm tall when I'm young, and short when I'm old. What am I?",
                        ),
                    ],
                },
            },
            chat: ChatCfg {
                crisis_phrases: ["suicide", "kill myself", "end my life", "want to die", "hopeless"]
                    .map(String::from)
                    .to_vec(),
                safety_message: String::from(
                    "💜 You're not alone. If you're in danger, please call emergency services. In India: AASRA 91-9820466726.",
                ),
                greeting_reply: String::from(
                    "Hello! Thanks for reaching out. How are you feeling today?",
                ),
                question_reply: String::from(
                    "That's a great question. Tell me more about what's on your mind.",
                ),
                default_reply: String::from("Thanks for sharing. I hear you — tell me more."),
                positive_words: ["happy", "good", "great", "well", "positive", "joy"]
                    .map(String::from)
                    .to_vec(),
                negative_words: ["sad", "bad", "unhappy", "stress", "anxious", "pain"]
                    .map(String::from)
                    .to_vec(),
                input_retention: InputRetention::Clear,
                speak_replies: false,
            },
            story: StoryCfg {
                template: String::from(
                    "🌍 Once a traveler carried these thoughts:\n\n“{reflection}”\n\n✨ They found resilience, and finally reached their mansion of peace.",
                ),
                variant: StoryVariant::Still,
            },
            images: PageImages::default(),
        }
    }
}

fn normalize_items(items: &mut Vec<CatalogItem>) {
    for item in items.iter_mut() {
        item.answer = item.answer.trim().to_lowercase();
    }
    items.retain(|item| !item.answer.is_empty());
}

fn normalize_phrases(phrases: &mut Vec<String>) {
    for phrase in phrases.iter_mut() {
        *phrase = phrase.trim().to_lowercase();
    }
    phrases.retain(|p| !p.is_empty());
}
