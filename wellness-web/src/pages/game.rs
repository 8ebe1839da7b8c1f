use crate::app::state::ReplyAudio;
use crate::components::chat_panel::ChatPanel;
use crate::components::guess_form::GuessForm;
use crate::components::mood_tracker::MoodTracker;
use crate::i18n::{t, tr1};
use wellness_game::constants::NOTICE_GATE_LOCKED;
use wellness_game::{ChatLine, GameAction, GameKind, MoodEntry};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct GamePageProps {
    pub game: GameKind,
    #[prop_or_default]
    pub image: Option<AttrValue>,
    #[prop_or_default]
    pub hints: Option<Vec<String>>,
    pub prompt_count: usize,
    #[prop_or_default]
    pub can_reveal_hints: bool,
    /// Credits earned so far; shown on the locked gate banner.
    #[prop_or_default]
    pub credits: u32,
    /// Continue is only offered once the gate is open.
    #[prop_or_default]
    pub mansion_unlocked: bool,
    #[prop_or_default]
    pub reflection: String,
    #[prop_or_default]
    pub transcript: Vec<ChatLine>,
    #[prop_or_default]
    pub moods: Vec<MoodEntry>,
    #[prop_or_default]
    pub speech: Option<ReplyAudio>,
    pub on_action: Callback<GameAction>,
}

/// Actions for one press of Send. A blank draft sends nothing.
#[must_use]
pub fn send_actions(draft: &str) -> Vec<GameAction> {
    if draft.trim().is_empty() {
        return Vec::new();
    }
    vec![
        GameAction::TypeReflection(draft.to_string()),
        GameAction::SendChat,
    ]
}

/// One transport page: the mini-game, the reflection chat, and the mood log.
#[function_component(GamePage)]
pub fn game_page(props: &GamePageProps) -> Html {
    let on_check = props.on_action.reform(GameAction::Check);
    let on_reveal = props.on_action.reform(|()| GameAction::RevealHints);
    let on_reflection = props.on_action.reform(GameAction::TypeReflection);
    let on_send = {
        let cb = props.on_action.clone();
        Callback::from(move |draft: String| {
            for action in send_actions(&draft) {
                cb.emit(action);
            }
        })
    };
    let on_continue = {
        let cb = props.on_action.clone();
        Callback::from(move |_| cb.emit(GameAction::ContinueToMansion))
    };
    let on_change_vehicle = {
        let cb = props.on_action.clone();
        Callback::from(move |_| cb.emit(GameAction::ChangeVehicle))
    };

    let key = props.game.key();
    let gate = if props.mansion_unlocked {
        html! {
            <button type="button" data-testid="continue" onclick={on_continue}>
                { t("game.continue") }
            </button>
        }
    } else {
        html! {
            <p class="gate-locked" data-testid="gate-locked" role="status">
                { tr1(NOTICE_GATE_LOCKED, "credits", &props.credits.to_string()) }
            </p>
        }
    };

    html! {
        <section class={classes!("panel", "game", format!("game-{key}"))} data-testid={format!("{key}-screen")}>
            <h2>{ t(&format!("game.{key}.title")) }</h2>
            <p class="instructions">{ t(&format!("game.{key}.instructions")) }</p>
            if let Some(src) = props.image.clone() {
                <img class="page-image" {src} alt="" />
            }
            <GuessForm
                game={props.game}
                prompt_count={props.prompt_count}
                hints={props.hints.clone()}
                can_reveal_hints={props.can_reveal_hints}
                {on_check}
                {on_reveal}
            />
            <div class="journey-columns">
                <ChatPanel
                    reflection={props.reflection.clone()}
                    transcript={props.transcript.clone()}
                    speech={props.speech.clone()}
                    {on_reflection}
                    {on_send}
                />
                <MoodTracker moods={props.moods.clone()} />
            </div>
            <nav class="page-actions">
                { gate }
                <button type="button" data-testid="change-vehicle" onclick={on_change_vehicle}>
                    { t("game.change_vehicle") }
                </button>
            </nav>
        </section>
    }
}
