//! Progression gate for the closing mansion page.
use crate::constants::MANSION_CREDIT_THRESHOLD;

/// Whether enough credits have been earned to continue to the mansion.
#[must_use]
pub const fn can_enter_mansion(credits: u32) -> bool {
    credits >= MANSION_CREDIT_THRESHOLD
}

/// Credits still missing before the mansion unlocks.
#[must_use]
pub const fn credits_needed(credits: u32) -> u32 {
    MANSION_CREDIT_THRESHOLD.saturating_sub(credits)
}
