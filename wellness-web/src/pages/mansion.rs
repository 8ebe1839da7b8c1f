use crate::app::state::StoryImage;
use crate::components::story_view::StoryView;
use crate::i18n::t;
use wellness_game::MansionAction;
use wellness_game::constants::NOTICE_NO_REFLECTION;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct MansionPageProps {
    /// The original reflection, if one was ever written.
    #[prop_or_default]
    pub reflection: Option<String>,
    #[prop_or_default]
    pub image: Option<AttrValue>,
    #[prop_or_default]
    pub story: Option<StoryImage>,
    pub on_action: Callback<MansionAction>,
}

#[function_component(MansionPage)]
pub fn mansion_page(props: &MansionPageProps) -> Html {
    let on_generate = {
        let cb = props.on_action.clone();
        Callback::from(move |_| cb.emit(MansionAction::GenerateStory))
    };
    let on_restart = {
        let cb = props.on_action.clone();
        Callback::from(move |_| cb.emit(MansionAction::Restart))
    };

    html! {
        <section class="panel mansion" data-testid="mansion-screen">
            <h2>{ t("mansion.title") }</h2>
            <p>{ t("mansion.intro") }</p>
            if let Some(src) = props.image.clone() {
                <img class="page-image" {src} alt="" />
            }
            if let Some(reflection) = props.reflection.clone() {
                <blockquote class="reflection" aria-label={t("mansion.your_reflection")}>
                    { reflection }
                </blockquote>
            } else {
                <p class="notice notice-warning" role="alert" data-testid="no-reflection">
                    { t(NOTICE_NO_REFLECTION) }
                </p>
            }
            if let Some(story) = props.story.clone() {
                <StoryView {story} />
            }
            <nav class="page-actions">
                if props.reflection.is_some() {
                    <button type="button" data-testid="generate-story" onclick={on_generate}>
                        { t("mansion.generate") }
                    </button>
                }
                <button type="button" data-testid="restart" onclick={on_restart}>
                    { t("mansion.restart") }
                </button>
            </nav>
        </section>
    }
}
