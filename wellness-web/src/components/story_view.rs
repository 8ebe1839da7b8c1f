use crate::app::state::StoryImage;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub story: StoryImage,
}

/// The rendered story. Object URLs are released once the image has loaded.
#[function_component(StoryView)]
pub fn story_view(p: &Props) -> Html {
    let onload = {
        let src = p.story.src.clone();
        let revoke = p.story.revoke_on_load;
        Callback::from(move |_: Event| {
            if revoke {
                crate::dom::revoke_object_url(&src);
            }
        })
    };
    html! {
        <figure class="story" data-testid="story">
            <img src={p.story.src.clone()} alt={p.story.alt.clone()} {onload} />
            <figcaption class="sr-only">{ p.story.alt.clone() }</figcaption>
        </figure>
    }
}
