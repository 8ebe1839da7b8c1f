use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use crate::app::state::AppState;
#[cfg(target_arch = "wasm32")]
use wellness_game::PageAction;
use wellness_game::PageId;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::Navigator;

/// Route to push after the engine moved to `page`, or `None` if the address
/// bar already shows it.
pub(crate) fn next_route_for_page(page: PageId, current_route: Option<&Route>) -> Option<Route> {
    let new_route = Route::from_page(page);
    if Some(&new_route) == current_route {
        None
    } else {
        Some(new_route)
    }
}

/// Page the engine should be asked to navigate to for `route`. The 404 route
/// and the page already shown need no navigation.
pub(crate) fn next_page_for_route(current_page: PageId, route: Option<&Route>) -> Option<PageId> {
    let target = route.and_then(Route::to_page)?;
    (target != current_page).then_some(target)
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_sync_route_with_page(
    page: PageId,
    navigator: Option<Navigator>,
    active_route: Option<Route>,
) {
    let mounted = use_mut_ref(|| false);
    use_effect_with(page, move |page| {
        // The first render follows the address bar instead.
        if *mounted.borrow() {
            if let (Some(nav), Some(route)) = (
                navigator.as_ref(),
                next_route_for_page(*page, active_route.as_ref()),
            ) {
                nav.push(&route);
            }
        } else {
            *mounted.borrow_mut() = true;
        }
    });
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_sync_page_with_route(
    app_state: &AppState,
    navigator: Option<Navigator>,
    route: Option<Route>,
) {
    let state = app_state.clone();
    use_effect_with(route, move |route| {
        if let Some(target) = next_page_for_route(state.current_page(), route.as_ref()) {
            state.dispatch(PageAction::Navigate(target));
            let landed = state.current_page();
            if landed != target {
                if let Some(nav) = navigator.as_ref() {
                    nav.replace(&Route::from_page(landed));
                }
            }
        }
    });
}
