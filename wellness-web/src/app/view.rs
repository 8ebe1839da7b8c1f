use crate::app::state::AppState;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::notices::Notices;
use crate::pages::game::GamePage;
use crate::pages::home::HomePage;
use crate::pages::mansion::MansionPage;
use crate::pages::not_found::NotFound;
use crate::router::Route;
use wellness_game::{HomeAction, PageAction, PageBody, PageView};
use yew::prelude::*;
use yew_router::prelude::Navigator;

fn render_page(state: &AppState, view: &PageView) -> Html {
    let image = view.image.clone().map(AttrValue::from);
    match &view.body {
        PageBody::Home { games } => {
            let app = state.clone();
            let on_choose = Callback::from(move |game| {
                app.dispatch(PageAction::Home(HomeAction::Choose(game)));
            });
            html! { <HomePage games={games.clone()} {image} {on_choose} /> }
        }
        PageBody::Game {
            game,
            hints,
            prompt_count,
            can_reveal_hints,
            reflection,
            transcript,
            moods,
        } => {
            let app = state.clone();
            let on_action = Callback::from(move |action| app.dispatch(PageAction::Game(action)));
            html! {
                <GamePage
                    game={*game}
                    {image}
                    hints={hints.clone()}
                    prompt_count={*prompt_count}
                    can_reveal_hints={*can_reveal_hints}
                    credits={view.credits}
                    mansion_unlocked={view.mansion_unlocked}
                    reflection={reflection.clone()}
                    transcript={transcript.clone()}
                    moods={moods.clone()}
                    speech={(*state.speech).clone()}
                    {on_action}
                />
            }
        }
        PageBody::Mansion { reflection } => {
            let app = state.clone();
            let on_action = Callback::from(move |action| app.dispatch(PageAction::Mansion(action)));
            html! {
                <MansionPage
                    reflection={reflection.clone()}
                    {image}
                    story={(*state.story).clone()}
                    {on_action}
                />
            }
        }
    }
}

/// Render the shell around the current page. The 404 route replaces the page
/// body but leaves the session untouched.
pub fn render_app(state: &AppState, route: Option<&Route>, navigator: Option<Navigator>) -> Html {
    let view = (*state.view).clone();
    let on_lang_change = {
        let lang = state.current_language.clone();
        Callback::from(move |code: String| lang.set(code))
    };
    let main = if matches!(route, Some(Route::NotFound)) {
        let on_return = Callback::from(move |page| {
            if let Some(nav) = navigator.as_ref() {
                nav.push(&Route::from_page(page));
            }
        });
        html! { <NotFound current={view.page} credits={view.credits} {on_return} /> }
    } else {
        render_page(state, &view)
    };

    html! {
        <>
            <Header
                credits={view.credits}
                current_lang={(*state.current_language).clone()}
                {on_lang_change}
            />
            <main id="main" data-page={view.page.key()}>
                <Notices notices={(*state.notices).clone()} />
                { main }
            </main>
            <Footer />
        </>
    }
}
