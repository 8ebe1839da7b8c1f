use futures::executor::block_on;
use wellness_game::{ChatLine, GameKind, JourneyConfig, SessionState, render_view};
use wellness_game::{PageBody, PageId};
use wellness_web::app::state::StoryImage;
use wellness_web::pages::{
    game::{GamePage, GamePageProps},
    home::{HomePage, HomePageProps},
    mansion::{MansionPage, MansionPageProps},
    not_found::{NotFound, Props as NotFoundProps},
};
use yew::{Callback, LocalServerRenderer};

fn game_props(game: GameKind, hints: Option<Vec<String>>) -> GamePageProps {
    GamePageProps {
        game,
        image: None,
        hints,
        prompt_count: 3,
        can_reveal_hints: false,
        credits: 0,
        mansion_unlocked: false,
        reflection: String::new(),
        transcript: Vec::new(),
        moods: Vec::new(),
        speech: None,
        on_action: Callback::noop(),
    }
}

#[test]
fn home_page_offers_all_three_vehicles() {
    wellness_web::i18n::set_lang("en");
    let props = HomePageProps {
        games: GameKind::ALL.to_vec(),
        image: Some("img/home.png".into()),
        on_choose: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<HomePage>::with_props(props).render());
    assert!(html.contains("Choose your vehicle"));
    for key in ["choose-train", "choose-car", "choose-bus"] {
        assert!(html.contains(key), "missing {key}");
    }
    assert!(html.contains("img/home.png"));
}

#[test]
fn train_page_shows_hints_chat_and_mood_tracker() {
    wellness_web::i18n::set_lang("en");
    let hints = Some(vec![
        "Ticks but never talks".to_string(),
        "Has keys but opens nothing".to_string(),
        "Full of holes yet holds water".to_string(),
    ]);
    let html = block_on(
        LocalServerRenderer::<GamePage>::with_props(game_props(GameKind::Train, hints)).render(),
    );
    assert!(html.contains("train-screen"));
    assert!(html.contains("Hidden Object Hunt"));
    assert!(html.contains("Has keys but opens nothing"));
    assert!(html.contains("How are you feeling?"));
    assert!(html.contains("Mood tracker"));
}

#[test]
fn locked_game_page_shows_gate_banner_instead_of_continue() {
    wellness_web::i18n::set_lang("en");
    let mut props = game_props(GameKind::Train, None);
    props.credits = 2;
    let html = block_on(LocalServerRenderer::<GamePage>::with_props(props).render());
    assert!(html.contains("Earn at least 3 credits to unlock the Mansion (Current: 2)"));
    assert!(html.contains(r#"data-testid="gate-locked""#));
    assert!(!html.contains(r#"data-testid="continue""#));
    assert!(html.contains("Change vehicle"));
}

#[test]
fn unlocked_game_page_offers_continue() {
    wellness_web::i18n::set_lang("en");
    let mut props = game_props(GameKind::Bus, None);
    props.credits = 3;
    props.mansion_unlocked = true;
    let html = block_on(LocalServerRenderer::<GamePage>::with_props(props).render());
    assert!(html.contains(r#"data-testid="continue""#));
    assert!(html.contains("Continue to the Mansion"));
    assert!(!html.contains("Earn at least 3 credits"));
}

#[test]
fn gate_on_game_page_follows_core_view() {
    wellness_web::i18n::set_lang("en");
    let config = JourneyConfig::default();
    for (credits, unlocked) in [(0, false), (3, true)] {
        let state = SessionState {
            page: PageId::Car,
            credits,
            ..SessionState::default()
        };
        let view = render_view(&state, &config);
        assert_eq!(view.mansion_unlocked, unlocked);
        let mut props = game_props(GameKind::Car, None);
        props.credits = view.credits;
        props.mansion_unlocked = view.mansion_unlocked;
        let html = block_on(LocalServerRenderer::<GamePage>::with_props(props).render());
        assert_eq!(html.contains(r#"data-testid="continue""#), unlocked);
    }
}

#[test]
fn bus_page_hides_hints_until_asked() {
    wellness_web::i18n::set_lang("en");
    let mut props = game_props(GameKind::Bus, None);
    props.can_reveal_hints = true;
    props.transcript = vec![ChatLine::user("Feeling calm"), ChatLine::bot("Thank you.")];
    let html = block_on(LocalServerRenderer::<GamePage>::with_props(props).render());
    assert!(html.contains("Word Search"));
    assert!(html.contains("Show hints"));
    assert!(html.contains("Feeling calm"));
}

#[test]
fn mansion_page_shows_reflection_and_story() {
    wellness_web::i18n::set_lang("en");
    let props = MansionPageProps {
        reflection: Some("I was brave today".into()),
        image: None,
        story: Some(StoryImage {
            src: "blob:story-1".into(),
            alt: "Your journey story".into(),
            revoke_on_load: false,
        }),
        on_action: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<MansionPage>::with_props(props).render());
    assert!(html.contains("I was brave today"));
    assert!(html.contains("blob:story-1"));
    assert!(html.contains("Generate my story"));
    assert!(html.contains("Restart journey"));
    assert!(!html.contains("no-reflection"));
}

#[test]
fn mansion_page_without_reflection_has_no_quote() {
    wellness_web::i18n::set_lang("en");
    let props = MansionPageProps {
        reflection: None,
        image: None,
        story: None,
        on_action: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<MansionPage>::with_props(props).render());
    assert!(!html.contains("blockquote"));
    assert!(!html.contains("data-testid=\"story\""));
    assert!(html.contains("Write a reflection first, then come back for your story."));
    assert!(!html.contains("Generate my story"));
    assert!(html.contains("Restart journey"));
}

#[test]
fn not_found_page_offers_the_saved_page() {
    wellness_web::i18n::set_lang("en");
    let props = NotFoundProps {
        current: PageId::Bus,
        credits: 2,
        on_return: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<NotFound>::with_props(props).render());
    assert!(html.contains("Lost on the road"));
    assert!(html.contains("Your journey is saved (2 credits)."));
    assert!(html.contains("Return to where you were"));
    assert!(html.contains("Back to the start"));
}

#[test]
fn not_found_from_home_only_offers_the_start() {
    wellness_web::i18n::set_lang("en");
    let props = NotFoundProps {
        current: PageId::Home,
        credits: 0,
        on_return: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<NotFound>::with_props(props).render());
    assert!(!html.contains("resume-journey"));
    assert!(html.contains("start-over"));
}

#[test]
fn game_view_from_core_renders_as_page() {
    wellness_web::i18n::set_lang("en");
    let config = JourneyConfig::default();
    let state = SessionState {
        page: PageId::Car,
        ..SessionState::default()
    };
    let view = render_view(&state, &config);
    let PageBody::Game {
        game, prompt_count, ..
    } = view.body
    else {
        panic!("car page should render a game body");
    };
    let mut props = game_props(game, None);
    props.prompt_count = prompt_count;
    let html = block_on(LocalServerRenderer::<GamePage>::with_props(props).render());
    assert!(html.contains("car-screen"));
    assert!(html.contains("Riddle Ride"));
}
