use crate::i18n::{t, tr1};
use wellness_game::GameKind;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub game: GameKind,
    pub prompt_count: usize,
    /// `None` while hints are hidden.
    #[prop_or_default]
    pub hints: Option<Vec<String>>,
    #[prop_or_default]
    pub can_reveal_hints: bool,
    pub on_check: Callback<Vec<String>>,
    pub on_reveal: Callback<()>,
}

#[function_component(GuessForm)]
pub fn guess_form(p: &Props) -> Html {
    let guesses = use_state(|| vec![String::new(); p.prompt_count]);
    {
        let guesses = guesses.clone();
        use_effect_with((p.game, p.prompt_count), move |(_, count)| {
            guesses.set(vec![String::new(); *count]);
        });
    }

    let on_submit = {
        let guesses = guesses.clone();
        let cb = p.on_check.clone();
        let count = p.prompt_count;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            cb.emit((*guesses).clone());
            guesses.set(vec![String::new(); count]);
        })
    };
    let on_reveal = {
        let cb = p.on_reveal.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let hint_for = |index: usize| {
        p.hints
            .as_ref()
            .and_then(|hints| hints.get(index))
            .map(|hint| html! { <p class="hint" data-testid="hint">{ hint.clone() }</p> })
    };

    let fields = (0..p.prompt_count).map(|index| {
        let id = format!("guess-{}-{index}", p.game.key());
        let value = guesses.get(index).cloned().unwrap_or_default();
        let oninput = {
            let guesses = guesses.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let mut next = (*guesses).clone();
                if let Some(slot) = next.get_mut(index) {
                    *slot = input.value();
                }
                guesses.set(next);
            })
        };
        html! {
            <div class="guess-field">
                { hint_for(index).unwrap_or_default() }
                <label for={id.clone()}>{ tr1("game.guess_label", "n", &(index + 1).to_string()) }</label>
                <input {id} type="text" autocomplete="off" {value} {oninput} />
            </div>
        }
    });

    html! {
        <form class="guess-form" onsubmit={on_submit}>
            { for fields }
            if p.hints.is_none() {
                <p class="hints-hidden">{ t("game.hints_hidden") }</p>
            }
            <div class="guess-actions">
                <button type="submit" data-testid="check">{ t("game.check") }</button>
                if p.can_reveal_hints {
                    <button type="button" data-testid="reveal-hints" onclick={on_reveal}>
                        { t("game.show_hints") }
                    </button>
                }
            </div>
        </form>
    }
}
