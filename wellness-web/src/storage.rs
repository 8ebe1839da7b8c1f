//! Session persistence over the browser's per-tab `sessionStorage`.
use wellness_game::{SessionState, SessionStore, StorageError};

use crate::dom;

pub const SESSION_KEY: &str = "wellness.session";

/// Keeps the journey across page refreshes within one tab.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSessionStore;

pub(crate) fn encode_snapshot(state: &SessionState) -> Result<String, StorageError> {
    Ok(serde_json::to_string(state)?)
}

/// An empty slot reads as no session.
pub(crate) fn decode_snapshot(raw: Option<&str>) -> Result<Option<SessionState>, StorageError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(json) => Ok(Some(serde_json::from_str(json)?)),
    }
}

fn storage() -> Result<web_sys::Storage, StorageError> {
    dom::session_storage().map_err(|err| {
        log::debug!("session storage unavailable: {err}");
        StorageError::Unavailable
    })
}

impl SessionStore for WebSessionStore {
    type Error = StorageError;

    fn save(&self, state: &SessionState) -> Result<(), Self::Error> {
        let json = encode_snapshot(state)?;
        storage()?
            .set_item(SESSION_KEY, &json)
            .map_err(|err| StorageError::Write(dom::js_error_message(&err)))
    }

    fn load(&self) -> Result<Option<SessionState>, Self::Error> {
        let raw = storage()?.get_item(SESSION_KEY).ok().flatten();
        decode_snapshot(raw.as_deref())
    }

    fn clear(&self) -> Result<(), Self::Error> {
        storage()?
            .remove_item(SESSION_KEY)
            .map_err(|err| StorageError::Write(dom::js_error_message(&err)))
    }
}
