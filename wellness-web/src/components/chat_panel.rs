use crate::app::state::ReplyAudio;
use crate::i18n::t;
use wellness_game::{ChatLine, Speaker};
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Reflection currently held by the session.
    pub reflection: String,
    pub transcript: Vec<ChatLine>,
    /// Spoken version of the latest reply, when synthesis succeeded.
    #[prop_or_default]
    pub speech: Option<ReplyAudio>,
    /// Fired when the textarea commits its value.
    pub on_reflection: Callback<String>,
    /// Fired with the draft when the user presses Send.
    pub on_send: Callback<String>,
}

fn speaker_label(speaker: Speaker) -> String {
    match speaker {
        Speaker::User => t("chat.you"),
        Speaker::Bot => t("chat.bot"),
    }
}

#[function_component(ChatPanel)]
pub fn chat_panel(p: &Props) -> Html {
    let draft = use_state(|| p.reflection.clone());
    {
        let draft = draft.clone();
        use_effect_with(p.reflection.clone(), move |reflection| {
            draft.set(reflection.clone());
        });
    }

    let on_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            draft.set(area.value());
        })
    };
    let on_change = {
        let cb = p.on_reflection.clone();
        Callback::from(move |e: Event| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            cb.emit(area.value());
        })
    };
    let on_send = {
        let draft = draft.clone();
        let cb = p.on_send.clone();
        Callback::from(move |_| cb.emit((*draft).clone()))
    };
    let speech = p.speech.clone().map(|audio| {
        let onloadeddata = {
            let src = audio.src.clone();
            let revoke = audio.revoke_on_load;
            Callback::from(move |_: Event| {
                if revoke {
                    crate::dom::revoke_object_url(&src);
                }
            })
        };
        html! {
            <audio class="reply-audio" data-testid="reply-audio" controls=true {onloadeddata}>
                <source src={audio.src.clone()} type={audio.mime.clone()} />
            </audio>
        }
    });

    html! {
        <section class="chat-panel" aria-labelledby="chat-title">
            <h2 id="chat-title">{ t("chat.title") }</h2>
            <label for="reflection" class="sr-only">{ t("chat.title") }</label>
            <textarea
                id="reflection"
                rows="4"
                placeholder={t("chat.placeholder")}
                value={(*draft).clone()}
                oninput={on_input}
                onchange={on_change}
            />
            <div class="chat-actions">
                <button type="button" data-testid="send" onclick={on_send}>{ t("chat.send") }</button>
                // The browser build has no audio capture.
                <button type="button" data-testid="record" disabled=true>
                    { t("chat.record") }
                </button>
            </div>
            <p class="record-note">{ t("chat.record_unavailable") }</p>
            { for speech }
            <h3>{ t("chat.transcript") }</h3>
            if p.transcript.is_empty() {
                <p class="chat-empty">{ t("chat.empty") }</p>
            } else {
                <ol class="transcript" aria-live="polite">
                    { for p.transcript.iter().map(|line| {
                        let class = match line.speaker {
                            Speaker::User => "line line-user",
                            Speaker::Bot => "line line-bot",
                        };
                        html! {
                            <li {class}>
                                <strong>{ format!("{}: ", speaker_label(line.speaker)) }</strong>
                                { line.text.clone() }
                            </li>
                        }
                    }) }
                </ol>
            }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn props(transcript: Vec<ChatLine>, speech: Option<ReplyAudio>) -> Props {
        Props {
            reflection: "a quiet morning".into(),
            transcript,
            speech,
            on_reflection: Callback::noop(),
            on_send: Callback::noop(),
        }
    }

    #[test]
    fn empty_transcript_and_disabled_recorder() {
        crate::i18n::set_lang("en");
        let html = block_on(LocalServerRenderer::<ChatPanel>::with_props(props(Vec::new(), None)).render());
        assert!(html.contains("No messages yet."));
        assert!(html.contains("Voice input is not available"));
        assert!(html.contains("disabled"));
        assert!(!html.contains("reply-audio"));
    }

    #[test]
    fn transcript_lines_are_labelled_by_speaker() {
        crate::i18n::set_lang("en");
        let lines = vec![
            ChatLine::user("I feel calm today"),
            ChatLine::bot("Thank you for sharing."),
        ];
        let html = block_on(LocalServerRenderer::<ChatPanel>::with_props(props(lines, None)).render());
        assert!(html.contains("line-user"));
        assert!(html.contains("Companion: "));
        assert!(html.contains("Thank you for sharing."));
    }

    #[test]
    fn spoken_reply_is_offered_as_audio() {
        crate::i18n::set_lang("en");
        let speech = ReplyAudio {
            src: "blob:reply-1".into(),
            mime: "audio/mpeg".into(),
            revoke_on_load: true,
        };
        let lines = vec![ChatLine::user("long day"), ChatLine::bot("I hear you.")];
        let html = block_on(
            LocalServerRenderer::<ChatPanel>::with_props(props(lines, Some(speech))).render(),
        );
        assert!(html.contains(r#"data-testid="reply-audio""#));
        assert!(html.contains(r#"src="blob:reply-1""#));
        assert!(html.contains(r#"type="audio/mpeg""#));
    }
}
