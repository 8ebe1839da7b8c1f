use serde_json::Value;
use wellness_game::Notice;

const ENGLISH_BUNDLE: &str = include_str!("../../../wellness-web/i18n/en.json");

/// English notice text, read from the web front end's locale bundle so
/// failure reports quote what a player would have seen.
#[derive(Debug, Clone)]
pub struct Messages {
    bundle: Value,
}

impl Messages {
    pub fn english() -> Self {
        let bundle = serde_json::from_str(ENGLISH_BUNDLE).unwrap_or_else(|err| {
            log::warn!("english bundle unreadable, notices will show raw keys: {err}");
            Value::Null
        });
        Self { bundle }
    }

    /// Text for `key`, or the key itself when it has none.
    pub fn text(&self, key: &str) -> String {
        key.split('.')
            .try_fold(&self.bundle, |node, part| node.get(part))
            .and_then(Value::as_str)
            .map_or_else(|| key.to_string(), str::to_string)
    }

    pub fn render(&self, notice: &Notice) -> String {
        notice
            .args
            .iter()
            .fold(self.text(notice.key), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }

    pub fn render_all(&self, notices: &[Notice]) -> String {
        if notices.is_empty() {
            return "(no notices)".to_string();
        }
        notices
            .iter()
            .map(|n| self.render(n))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellness_game::NoticeLevel;
    use wellness_game::constants::{NOTICE_CAR_WRONG, NOTICE_GATE_LOCKED};

    #[test]
    fn renders_notice_arguments() {
        let messages = Messages::english();
        let notice = Notice::new(NOTICE_GATE_LOCKED, NoticeLevel::Info)
            .arg("needed", 1)
            .arg("credits", 2);
        assert_eq!(
            messages.render(&notice),
            "Earn at least 3 credits to unlock the Mansion (Current: 2)"
        );
    }

    #[test]
    fn unknown_keys_fall_back_to_the_key() {
        let messages = Messages::english();
        assert_eq!(messages.text("notice.nope"), "notice.nope");
        let wrong = Notice::new(NOTICE_CAR_WRONG, NoticeLevel::Error).arg("answer", "map");
        assert_eq!(messages.render_all(&[wrong]), "Wrong. The answer was: map");
        assert_eq!(messages.render_all(&[]), "(no notices)");
    }
}
