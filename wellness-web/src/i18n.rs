use once_cell::sync::Lazy;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;

use wellness_game::Notice;

const LOCALE_STORAGE_KEY: &str = "wellness.locale";
const FALLBACK_LANG: &str = "en";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocaleMeta {
    pub code: &'static str,
    pub name: &'static str,
}

const LOCALE_META: &[LocaleMeta] = &[
    LocaleMeta {
        code: "en",
        name: "English",
    },
    LocaleMeta {
        code: "es",
        name: "Español",
    },
];

const LOCALE_TABLE: &[(&str, &str)] = &[
    ("en", include_str!("../i18n/en.json")),
    ("es", include_str!("../i18n/es.json")),
];

/// Every bundle, parsed once. A bundle that fails to parse is left out and
/// lookups fall through to English.
static BUNDLES: Lazy<BTreeMap<&'static str, Value>> = Lazy::new(|| {
    LOCALE_TABLE
        .iter()
        .filter_map(|(code, raw)| match serde_json::from_str(raw) {
            Ok(value) => Some((*code, value)),
            Err(err) => {
                log::warn!("locale bundle {code} rejected: {err}");
                None
            }
        })
        .collect()
});

thread_local! {
    static CURRENT: RefCell<&'static str> = RefCell::new(normalize_lang(&saved_lang()));
}

/// Supported locales with their native names.
#[must_use]
pub const fn locales() -> &'static [LocaleMeta] {
    LOCALE_META
}

fn normalize_lang(lang: &str) -> &'static str {
    LOCALE_META
        .iter()
        .find(|meta| meta.code.eq_ignore_ascii_case(lang.trim()))
        .map_or(FALLBACK_LANG, |meta| meta.code)
}

fn saved_lang() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(LOCALE_STORAGE_KEY).ok().flatten())
            .unwrap_or_else(|| FALLBACK_LANG.to_string())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        FALLBACK_LANG.to_string()
    }
}

/// Switch the active language. Unknown codes select English.
///
/// In the browser the choice is written to `localStorage` and mirrored onto
/// `<html lang>`.
pub fn set_lang(lang: &str) {
    let code = normalize_lang(lang);
    CURRENT.with(|cell| *cell.borrow_mut() = code);
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = el.set_attribute("lang", code);
        }
        if let Some(storage) = web_sys::window().and_then(|win| win.local_storage().ok().flatten())
        {
            let _ = storage.set_item(LOCALE_STORAGE_KEY, code);
        }
    }
}

#[must_use]
pub fn current_lang() -> String {
    CURRENT.with(|c| (*c.borrow()).to_string())
}

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, part| current.get(part))
}

fn render_value(value: &Value, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = value.as_str()?.to_string();
    if let Some(args) = args {
        for (k, v) in args {
            text = text.replace(&format!("{{{k}}}"), v);
        }
    }
    Some(text)
}

fn resolve(key: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let lang = CURRENT.with(|c| *c.borrow());
    let lookup = |code: &str| {
        BUNDLES
            .get(code)
            .and_then(|bundle| get_nested_value(bundle, key))
            .and_then(|v| render_value(v, args))
    };
    lookup(lang).or_else(|| lookup(FALLBACK_LANG))
}

/// Translate a key to the current language, falling back to English and
/// then to the key itself.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate a key and substitute `{name}` placeholders.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    resolve(key, args).unwrap_or_else(|| key.to_string())
}

/// Shorthand for a single placeholder.
#[must_use]
pub fn tr1(key: &str, name: &str, value: &str) -> String {
    let args = BTreeMap::from([(name, value)]);
    tr(key, Some(&args))
}

/// Render a core notice in the current language.
#[must_use]
pub fn notice_text(notice: &Notice) -> String {
    let args: BTreeMap<&str, &str> = notice
        .args
        .iter()
        .map(|(k, v)| (*k, v.as_str()))
        .collect();
    tr(notice.key, Some(&args))
}
