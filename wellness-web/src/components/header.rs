use crate::i18n::{locales, set_lang, t, tr1};
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub credits: u32,
    pub current_lang: String,
    pub on_lang_change: Callback<String>,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let on_change = {
        let cb = p.on_lang_change.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(sel) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
            {
                set_lang(&sel.value());
                cb.emit(sel.value());
            }
        })
    };
    let credits = p.credits.to_string();
    html! {
        <header role="banner">
            <a href="#main" class="sr-only">{ t("ui.skip_to_content") }</a>
            <div class="header-content">
                <div class="header-left">
                    <h1 class="app-title">{ t("app.title") }</h1>
                </div>
                <nav aria-label={t("nav.language")} class="header-right">
                    <span class="credits-badge" data-testid="credits" aria-live="polite">
                        { tr1("nav.credits", "credits", &credits) }
                    </span>
                    <label for="lang-select" class="sr-only">{ t("nav.language") }</label>
                    <select id="lang-select" onchange={on_change} aria-label={t("nav.language")}>
                        { for locales().iter().map(|meta| html! {
                            <option value={meta.code} selected={meta.code == p.current_lang}>
                                { meta.name }
                            </option>
                        }) }
                    </select>
                </nav>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn header_shows_credits_and_locales() {
        crate::i18n::set_lang("en");
        let props = Props {
            credits: 2,
            current_lang: "en".into(),
            on_lang_change: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<Header>::with_props(props).render());
        assert!(html.contains("Credits: 2"));
        assert!(html.contains("Español"));
        assert!(html.contains("Journey to Wellness"));
    }
}
