use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, Storage, Url, Window};

#[derive(Debug, Error)]
pub enum DomError {
    #[error("no browser window is available")]
    NoWindow,
    #[error("{0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_error_message(&value))
    }
}

/// The global `window`, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Access the tab-scoped `sessionStorage`.
///
/// # Errors
///
/// Returns an error when there is no window or storage is disabled.
pub fn session_storage() -> Result<Storage, DomError> {
    window()
        .ok_or(DomError::NoWindow)?
        .session_storage()?
        .ok_or_else(|| DomError::Js("sessionStorage unavailable".into()))
}

/// Whether the page was opened with `?test=1`.
#[must_use]
pub fn test_mode_enabled() -> bool {
    window()
        .and_then(|win| win.location().search().ok())
        .is_some_and(|search| query_has_test_flag(&search))
}

pub(crate) fn query_has_test_flag(search: &str) -> bool {
    search
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair == "test=1")
}

/// Seed for challenge sampling taken from the clock and `Math.random`.
#[must_use]
pub fn entropy_seed() -> u64 {
    let now = js_sys::Date::now();
    let jitter = js_sys::Math::random();
    mix_seed(now, jitter)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn mix_seed(now_ms: f64, jitter: f64) -> u64 {
    let time = now_ms.max(0.0) as u64;
    let noise = (jitter.clamp(0.0, 1.0) * f64::from(u32::MAX)) as u64;
    time.rotate_left(17) ^ noise.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Wrap rendered bytes in a Blob and return an object URL for it.
///
/// # Errors
///
/// Returns an error if the Blob or URL cannot be created.
pub fn object_url_for(bytes: &[u8], mime: &str) -> Result<String, DomError> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    Ok(Url::create_object_url_with_blob(&blob)?)
}

/// Release an object URL once its image has been displayed.
pub fn revoke_object_url(url: &str) {
    if let Err(err) = Url::revoke_object_url(url) {
        log::warn!("could not revoke {url}: {}", js_error_message(&err));
    }
}
