use crate::i18n::t;
use wellness_game::GameKind;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct HomePageProps {
    pub games: Vec<GameKind>,
    #[prop_or_default]
    pub image: Option<AttrValue>,
    pub on_choose: Callback<GameKind>,
}

fn game_labels(game: GameKind) -> (String, String) {
    (
        t(&format!("home.{}", game.key())),
        t(&format!("home.{}_desc", game.key())),
    )
}

#[function_component(HomePage)]
pub fn home_page(props: &HomePageProps) -> Html {
    let choices = props.games.iter().map(|&game| {
        let (label, desc) = game_labels(game);
        let onclick = {
            let cb = props.on_choose.clone();
            Callback::from(move |_| cb.emit(game))
        };
        html! {
            <li class="vehicle">
                <button type="button" data-testid={format!("choose-{}", game.key())} {onclick}>
                    { label }
                </button>
                <p>{ desc }</p>
            </li>
        }
    });

    html! {
        <section class="panel home" data-testid="home-screen">
            <h2>{ t("home.title") }</h2>
            <p>{ t("home.intro") }</p>
            if let Some(src) = props.image.clone() {
                <img class="page-image" {src} alt="" />
            }
            <ul class="vehicles">{ for choices }</ul>
        </section>
    }
}
