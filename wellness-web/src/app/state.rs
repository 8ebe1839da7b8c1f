use std::cell::RefCell;
use std::rc::Rc;

use wellness_game::{
    CycleOutcome, JourneyConfig, JourneyEngine, Notice, PageAction, PageId, PageView,
    RenderedNarrative, SpeechClip,
};
use yew::prelude::*;

/// A rendered story ready for an `<img>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoryImage {
    pub src: AttrValue,
    pub alt: AttrValue,
    /// The source is an object URL that must be revoked once the image loads.
    pub revoke_on_load: bool,
}

/// A spoken chat reply ready for an `<audio>` element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyAudio {
    pub src: AttrValue,
    pub mime: AttrValue,
    pub revoke_on_load: bool,
}

#[cfg(target_arch = "wasm32")]
fn object_url(what: &str, bytes: &[u8], mime: &str) -> Option<AttrValue> {
    match crate::dom::object_url_for(bytes, mime) {
        Ok(url) => Some(AttrValue::from(url)),
        Err(err) => {
            log::error!("{what} could not be attached: {err}");
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn object_url(what: &str, bytes: &[u8], _mime: &str) -> Option<AttrValue> {
    log::debug!("{what} produced off-browser ({} bytes), nothing to attach", bytes.len());
    None
}

fn story_image(rendered: &RenderedNarrative) -> Option<StoryImage> {
    object_url("story image", &rendered.bytes, &rendered.mime).map(|src| StoryImage {
        src,
        alt: AttrValue::from(rendered.alt_text.clone()),
        revoke_on_load: true,
    })
}

fn reply_audio(clip: &SpeechClip) -> Option<ReplyAudio> {
    object_url("reply audio", &clip.bytes, &clip.mime).map(|src| ReplyAudio {
        src,
        mime: AttrValue::from(clip.mime.clone()),
        revoke_on_load: true,
    })
}

/// Build the journey engine, restoring the tab's saved session in the browser.
#[must_use]
pub fn build_engine() -> JourneyEngine {
    let config = JourneyConfig::load_from_static();
    #[cfg(target_arch = "wasm32")]
    {
        let mut engine = JourneyEngine::offline(config, crate::dom::entropy_seed());
        if let Err(err) = engine.restore(&crate::storage::WebSessionStore) {
            log::warn!("saved session ignored: {err}");
        }
        engine
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        JourneyEngine::offline(config, 0x5EED)
    }
}

fn persist(engine: &JourneyEngine) {
    #[cfg(target_arch = "wasm32")]
    if let Err(err) = engine.save(&crate::storage::WebSessionStore) {
        log::warn!("session not saved: {err}");
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = engine;
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Rc<RefCell<JourneyEngine>>,
    pub view: UseStateHandle<PageView>,
    pub notices: UseStateHandle<Vec<Notice>>,
    pub story: UseStateHandle<Option<StoryImage>>,
    pub speech: UseStateHandle<Option<ReplyAudio>>,
    pub current_language: UseStateHandle<String>,
}

#[hook]
pub fn use_app_state() -> AppState {
    let engine = use_mut_ref(build_engine);
    let view = {
        let engine = engine.clone();
        use_state(move || engine.borrow().view())
    };
    AppState {
        engine,
        view,
        notices: use_state(Vec::<Notice>::new),
        story: use_state(|| None::<StoryImage>),
        speech: use_state(|| None::<ReplyAudio>),
        current_language: use_state(crate::i18n::current_lang),
    }
}

impl AppState {
    /// Run one render cycle and publish its results.
    pub fn dispatch(&self, action: PageAction) {
        let outcome = self.engine.borrow_mut().dispatch(action);
        self.publish(outcome);
    }

    fn publish(&self, outcome: CycleOutcome) {
        let engine = self.engine.borrow();
        persist(&engine);
        self.view.set(engine.view());
        match outcome.story.as_ref() {
            Some(rendered) => self.story.set(story_image(rendered)),
            None if outcome.page_after != PageId::Mansion => self.story.set(None),
            None => {}
        }
        if let Some(chat) = outcome.chat.as_ref() {
            self.speech.set(chat.speech.as_ref().and_then(reply_audio));
        } else if outcome.page_after != outcome.page_before {
            self.speech.set(None);
        }
        self.notices.set(outcome.notices);
    }

    /// Start over from Home without going through the mansion.
    pub fn reset_journey(&self) {
        {
            let mut engine = self.engine.borrow_mut();
            engine.reset();
            persist(&engine);
        }
        self.view.set(self.engine.borrow().view());
        self.notices.set(Vec::new());
        self.story.set(None);
        self.speech.set(None);
    }

    pub fn reseed(&self, seed: u64) {
        self.engine.borrow_mut().reseed(seed);
    }

    #[must_use]
    pub fn current_page(&self) -> PageId {
        self.engine.borrow().state().page
    }
}
