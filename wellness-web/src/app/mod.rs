#[cfg(target_arch = "wasm32")]
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::*;

pub mod routing;
pub mod state;
pub mod test_bridge;
pub mod view;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppInner />
        </BrowserRouter>
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(AppInner)]
pub fn app_inner() -> Html {
    let app_state = state::use_app_state();
    test_bridge::use_test_bridge(&app_state);

    let navigator = use_navigator();
    let route = use_route::<Route>();

    routing::use_sync_route_with_page(app_state.view.page, navigator.clone(), route.clone());
    routing::use_sync_page_with_route(&app_state, navigator.clone(), route.clone());

    view::render_app(&app_state, route.as_ref(), navigator)
}
