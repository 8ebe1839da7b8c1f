use crate::i18n::t;
use wellness_game::MoodEntry;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Newest first.
    pub moods: Vec<MoodEntry>,
}

#[function_component(MoodTracker)]
pub fn mood_tracker(p: &Props) -> Html {
    html! {
        <aside class="mood-tracker" aria-labelledby="mood-title">
            <h2 id="mood-title">{ t("mood.title") }</h2>
            if p.moods.is_empty() {
                <p class="mood-empty">{ t("mood.empty") }</p>
            } else {
                <table class="mood-log">
                    <tbody>
                        { for p.moods.iter().map(|entry| html! {
                            <tr>
                                <td class="mood-time">{ entry.time_label() }</td>
                                <td class="mood-text">{ entry.text.clone() }</td>
                                <td title={t("mood.sentiment")}>{ entry.sentiment_label() }</td>
                                <td title={t("mood.tone")}>{ entry.tone_label() }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            }
        </aside>
    }
}
