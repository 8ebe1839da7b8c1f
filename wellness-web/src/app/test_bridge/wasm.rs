use super::{BRIDGE_GLOBAL, BridgeSnapshot, seed_from_js};
use crate::app::state::AppState;
use crate::dom;
use wasm_bindgen::prelude::*;
use wellness_game::{PageAction, PageId};
use yew::prelude::*;

struct BridgeBindings {
    _state: Closure<dyn FnMut() -> JsValue>,
    _seed: Closure<dyn FnMut(JsValue)>,
    _answers: Closure<dyn FnMut() -> JsValue>,
    _reset: Closure<dyn FnMut()>,
    _goto: Closure<dyn FnMut(JsValue)>,
}

impl BridgeBindings {
    fn entries(&self) -> [(&'static str, &JsValue); 5] {
        [
            ("state", self._state.as_ref()),
            ("seed", self._seed.as_ref()),
            ("answers", self._answers.as_ref()),
            ("reset", self._reset.as_ref()),
            ("goto", self._goto.as_ref()),
        ]
    }
}

fn snapshot(state: &AppState) -> BridgeSnapshot {
    BridgeSnapshot::of(state.engine.borrow().state())
}

fn build_bridge(state: &AppState) -> BridgeBindings {
    let state_state = state.clone();
    let state_fn = Closure::wrap(Box::new(move || {
        serde_wasm_bindgen::to_value(&snapshot(&state_state)).unwrap_or(JsValue::NULL)
    }) as Box<dyn FnMut() -> JsValue>);

    let seed_state = state.clone();
    let seed = Closure::wrap(Box::new(move |value: JsValue| {
        if let Some(seed) = seed_from_js(value.as_f64()) {
            seed_state.reseed(seed);
        }
    }) as Box<dyn FnMut(JsValue)>);

    let answers_state = state.clone();
    let answers = Closure::wrap(Box::new(move || {
        let answers = answers_state.engine.borrow().current_answers();
        serde_wasm_bindgen::to_value(&answers).unwrap_or(JsValue::NULL)
    }) as Box<dyn FnMut() -> JsValue>);

    let reset_state = state.clone();
    let reset = Closure::wrap(Box::new(move || reset_state.reset_journey()) as Box<dyn FnMut()>);

    let goto_state = state.clone();
    let goto = Closure::wrap(Box::new(move |value: JsValue| {
        if let Some(key) = value.as_string() {
            goto_state.dispatch(PageAction::Navigate(PageId::from_key(&key)));
        }
    }) as Box<dyn FnMut(JsValue)>);

    BridgeBindings {
        _state: state_fn,
        _seed: seed,
        _answers: answers,
        _reset: reset,
        _goto: goto,
    }
}

fn attach_bridge(bindings: &BridgeBindings) {
    let Some(window) = dom::window() else {
        return;
    };
    let bridge = js_sys::Object::new();
    for (name, func) in bindings.entries() {
        let _ = js_sys::Reflect::set(&bridge, &JsValue::from_str(name), func);
    }
    let _ = js_sys::Reflect::set(&window, &JsValue::from_str(BRIDGE_GLOBAL), &bridge);
    log::info!("test bridge installed on window.{BRIDGE_GLOBAL}");
}

#[hook]
pub fn use_test_bridge(app_state: &AppState) {
    let bridge_handle = use_mut_ref(|| None::<BridgeBindings>);
    let state = app_state.clone();

    use_effect_with((), move |()| {
        if bridge_handle.borrow().is_none() && dom::test_mode_enabled() {
            let bindings = build_bridge(&state);
            attach_bridge(&bindings);
            *bridge_handle.borrow_mut() = Some(bindings);
        }
    });
}
