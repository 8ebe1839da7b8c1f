//! `window.__wellnessTest`, installed when the page is opened with `?test=1`.
//!
//! The snapshot shape is shared with the tester's `BridgeState`.
#[cfg(target_arch = "wasm32")]
mod wasm;

use crate::app::state::AppState;
use serde::Serialize;
use wellness_game::SessionState;
use yew::prelude::*;

pub(crate) const BRIDGE_GLOBAL: &str = "__wellnessTest";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct BridgeSnapshot {
    pub page: &'static str,
    pub credits: u32,
    pub mansion_unlocked: bool,
    pub reflection: String,
    pub chat_lines: usize,
    pub moods: usize,
    pub hints_revealed: bool,
}

impl BridgeSnapshot {
    pub(crate) fn of(session: &SessionState) -> Self {
        Self {
            page: session.page.key(),
            credits: session.credits,
            mansion_unlocked: session.mansion_unlocked(),
            reflection: session.reflection_current.clone(),
            chat_lines: session.chat_history.len(),
            moods: session.mood_log.len(),
            hints_revealed: session.hints_revealed,
        }
    }
}

/// Seeds arrive as JS numbers; negatives and non-numbers are ignored.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn seed_from_js(value: Option<f64>) -> Option<u64> {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.trunc() as u64)
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_test_bridge(app_state: &AppState) {
    wasm::use_test_bridge(app_state);
}

/// Nothing to install outside the browser.
#[cfg(not(target_arch = "wasm32"))]
#[hook]
pub fn use_test_bridge(app_state: &AppState) {
    log::trace!(
        "window.{BRIDGE_GLOBAL} not installed off-browser (page {})",
        app_state.current_page()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellness_game::{ChatLine, PageId};

    #[test]
    fn snapshot_reports_session_progress() {
        let session = SessionState {
            page: PageId::Bus,
            credits: 3,
            reflection_current: "slower mornings".into(),
            chat_history: vec![ChatLine::user("hi there"), ChatLine::bot("Hello!")],
            hints_revealed: true,
            ..SessionState::default()
        };
        let snapshot = BridgeSnapshot::of(&session);
        assert_eq!(snapshot.page, "bus");
        assert!(snapshot.mansion_unlocked);
        assert_eq!(snapshot.chat_lines, 2);
        assert_eq!(snapshot.moods, 0);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["reflection"], "slower mornings");
        assert_eq!(json["hints_revealed"], true);
    }

    #[test]
    fn fresh_session_snapshot_is_locked_at_home() {
        let snapshot = BridgeSnapshot::of(&SessionState::default());
        assert_eq!(snapshot.page, "home");
        assert!(!snapshot.mansion_unlocked);
        assert!(snapshot.reflection.is_empty());
    }

    #[test]
    fn seeds_must_be_non_negative_numbers() {
        assert_eq!(seed_from_js(Some(42.0)), Some(42));
        assert_eq!(seed_from_js(Some(7.9)), Some(7));
        assert_eq!(seed_from_js(Some(-1.0)), None);
        assert_eq!(seed_from_js(Some(f64::NAN)), None);
        assert_eq!(seed_from_js(None), None);
    }
}
