use crate::i18n::notice_text;
use wellness_game::Notice;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub notices: Vec<Notice>,
}

/// Messages from the last render cycle, newest cycle only.
#[function_component(Notices)]
pub fn notices(p: &Props) -> Html {
    if p.notices.is_empty() {
        return Html::default();
    }
    html! {
        <ul class="notices" role="status" aria-live="polite">
            { for p.notices.iter().map(|notice| {
                let class = classes!("notice", format!("notice-{}", notice.level.as_str()));
                html! { <li {class} data-key={notice.key}>{ notice_text(notice) }</li> }
            }) }
        </ul>
    }
}
