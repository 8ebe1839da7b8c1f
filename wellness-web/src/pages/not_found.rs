use crate::i18n::{t, tr1};
use wellness_game::PageId;
use yew::prelude::*;

/// Shown for addresses that name no page. The session is untouched, so the
/// traveler can pick up on the page they were on.
#[derive(Properties, PartialEq)]
pub struct Props {
    /// Page the session was on before the bad address.
    pub current: PageId,
    #[prop_or_default]
    pub credits: u32,
    pub on_return: Callback<PageId>,
}

#[function_component(NotFound)]
pub fn not_found(props: &Props) -> Html {
    let start_over = props.on_return.reform(|_: MouseEvent| PageId::Home);
    let resume = (props.current != PageId::Home).then(|| {
        let page = props.current;
        let onclick = props.on_return.reform(move |_: MouseEvent| page);
        html! {
            <button type="button" data-testid="resume-journey" {onclick}>
                { t("not_found.resume") }
            </button>
        }
    });

    html! {
        <section class="panel not-found" aria-live="assertive" data-testid="not-found">
            <h2>{ t("not_found.title") }</h2>
            <p>{ t("not_found.message") }</p>
            <p class="saved-progress">
                { tr1("not_found.saved", "credits", &props.credits.to_string()) }
            </p>
            <nav class="page-actions">
                { for resume }
                <button type="button" data-testid="start-over" onclick={start_over}>
                    { t("not_found.back") }
                </button>
            </nav>
        </section>
    }
}
