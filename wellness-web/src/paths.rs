//! Deployment base path handling.
//!
//! `PUBLIC_URL` (e.g. `/wellness` when hosted under a subdirectory) is read at
//! compile time and prefixed to router paths.
use wellness_game::PageId;

use crate::router::Route;
use yew_router::Routable;

fn public_url() -> &'static str {
    option_env!("PUBLIC_URL").unwrap_or("")
}

/// Base path for the router, or `None` when the app is served from the root.
#[must_use]
pub fn router_base() -> Option<String> {
    normalize_base(public_url())
}

/// Absolute href for a page, including the deployment base.
#[must_use]
pub fn page_href(page: PageId) -> String {
    join_base(public_url(), &Route::from_page(page).to_path())
}

fn normalize_base(base: &str) -> Option<String> {
    let trimmed = base.trim().trim_end_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn join_base(base: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    match normalize_base(base) {
        Some(base) if path.is_empty() => format!("{base}/"),
        Some(base) => format!("{base}/{path}"),
        None => format!("/{path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_deploy_has_no_base() {
        assert_eq!(router_base(), None);
        assert_eq!(page_href(PageId::Bus), "/bus");
        assert_eq!(page_href(PageId::Home), "/");
    }

    #[test]
    fn subdirectory_base_is_trimmed_and_joined() {
        assert_eq!(normalize_base(" /wellness/ "), Some("/wellness".into()));
        assert_eq!(join_base("/wellness/", "/mansion"), "/wellness/mansion");
        assert_eq!(join_base("/wellness", "/"), "/wellness/");
    }
}
