use wellness_game::PageId;
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/train")]
    Train,
    #[at("/car")]
    Car,
    #[at("/bus")]
    Bus,
    #[at("/mansion")]
    Mansion,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    #[must_use]
    pub const fn from_page(page: PageId) -> Self {
        match page {
            PageId::Home => Self::Home,
            PageId::Train => Self::Train,
            PageId::Car => Self::Car,
            PageId::Bus => Self::Bus,
            PageId::Mansion => Self::Mansion,
        }
    }

    /// The page this route shows. The 404 route keeps whatever page is current.
    #[must_use]
    pub const fn to_page(&self) -> Option<PageId> {
        match self {
            Self::Home => Some(PageId::Home),
            Self::Train => Some(PageId::Train),
            Self::Car => Some(PageId::Car),
            Self::Bus => Some(PageId::Bus),
            Self::Mansion => Some(PageId::Mansion),
            Self::NotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_round_trips_through_its_route() {
        for page in PageId::ALL {
            assert_eq!(Route::from_page(page).to_page(), Some(page));
        }
        assert_eq!(Route::NotFound.to_page(), None);
    }

    #[test]
    fn routes_recognize_page_paths() {
        assert_eq!(Route::recognize("/bus"), Some(Route::Bus));
        assert_eq!(Route::recognize("/mansion"), Some(Route::Mansion));
        assert_eq!(Route::recognize("/elsewhere"), Some(Route::NotFound));
        assert_eq!(Route::Car.to_path(), "/car");
    }
}
