use anyhow::{Context, Result, ensure};
use wellness_game::constants::{
    NOTICE_CHAT_TOO_SHORT, NOTICE_STORY_FAILED, NOTICE_TRANSCRIBE_EMPTY, NOTICE_TRANSCRIBED,
};
use wellness_game::{
    GameAction, GameKind, HomeAction, JourneyEngine, MansionAction, PageAction, PageId,
    SessionState,
};

use super::{LogicCtx, Scenario};
use crate::logic::doubles::{Outage, ScriptedTranscriber};

fn board_train(engine: &mut JourneyEngine) -> Result<()> {
    engine.dispatch(PageAction::Home(HomeAction::Choose(GameKind::Train)));
    ensure!(engine.state().page == PageId::Train, "could not board the train");
    Ok(())
}

fn say(engine: &mut JourneyEngine, text: &str) -> wellness_game::CycleOutcome {
    engine.dispatch(PageAction::Game(GameAction::TypeReflection(text.into())));
    engine.dispatch(PageAction::Game(GameAction::SendChat))
}

/// Crisis phrases get the safety message; short input is refused.
pub struct CrisisReplyScenario;

impl Scenario for CrisisReplyScenario {
    fn key(&self) -> &'static str {
        "crisis-reply"
    }

    fn description(&self) -> &'static str {
        "Crisis Phrases Get The Safety Message"
    }

    fn run_logic(&self, ctx: &LogicCtx<'_>) -> Result<()> {
        let mut engine = ctx.engine();
        board_train(&mut engine)?;

        let out = say(&mut engine, "hey");
        ensure!(
            out.has_notice(NOTICE_CHAT_TOO_SHORT),
            "short input accepted: {}",
            ctx.assets.messages.render_all(&out.notices)
        );
        ensure!(engine.state().chat_history.is_empty(), "short input reached the chat");

        let out = say(&mut engine, "Everything feels HOPELESS lately");
        let chat = out.chat.context("crisis message was not sent")?;
        ensure!(chat.crisis, "crisis phrase not detected");
        ensure!(
            chat.reply == ctx.assets.config.chat.safety_message,
            "crisis reply was {:?}",
            chat.reply
        );
        ensure!(engine.state().mood_log.len() == 1, "crisis message not logged as a mood");
        Ok(())
    }
}

/// Failing classifier, responder and renderer degrade without losing the session.
pub struct CollaboratorOutageScenario;

impl Scenario for CollaboratorOutageScenario {
    fn key(&self) -> &'static str {
        "collaborator-outage"
    }

    fn description(&self) -> &'static str {
        "Collaborator Outage Falls Back"
    }

    fn run_logic(&self, ctx: &LogicCtx<'_>) -> Result<()> {
        let collaborators = ctx
            .offline_collaborators()
            .with_classifier(Outage)
            .with_responder(Outage)
            .with_renderer(Outage);
        let mut engine = ctx.engine_with(collaborators);
        board_train(&mut engine)?;

        let out = say(&mut engine, "Today was a long day");
        let chat = out.chat.context("reflection was not sent")?;
        ensure!(chat.fell_back, "responder outage not reported");
        ensure!(
            chat.reply == ctx.assets.config.chat.default_reply,
            "fallback reply was {:?}",
            chat.reply
        );
        let mood = engine.state().mood_log.last().context("mood was not logged")?;
        ensure!(
            mood.sentiment.is_none() && mood.tone.is_none(),
            "mood labeled without a classifier"
        );

        let unlocked = SessionState {
            page: PageId::Mansion,
            credits: 3,
            ..engine.state().clone()
        };
        let mut engine = engine.with_state(unlocked);
        ensure!(engine.state().page == PageId::Mansion, "unlocked session left the mansion");
        let out = engine.dispatch(PageAction::Mansion(MansionAction::GenerateStory));
        ensure!(out.story.is_none(), "story rendered during an outage");
        let notice = out
            .notices
            .iter()
            .find(|n| n.key == NOTICE_STORY_FAILED)
            .context("story failure not reported")?;
        ensure!(
            notice.arg_value("reason").is_some_and(|r| r.contains("renderer")),
            "failure notice does not name the renderer: {}",
            ctx.assets.messages.render(notice)
        );
        ensure!(engine.state().has_reflection(), "outage lost the reflection");
        Ok(())
    }
}

/// Spoken reflections merge like typed ones; an unusable clip changes nothing.
pub struct VoiceReflectionScenario;

impl Scenario for VoiceReflectionScenario {
    fn key(&self) -> &'static str {
        "voice-reflection"
    }

    fn description(&self) -> &'static str {
        "Voice Reflection Merges Transcripts"
    }

    fn run_logic(&self, ctx: &LogicCtx<'_>) -> Result<()> {
        let clip = vec![0x52, 0x49, 0x46, 0x46];

        let mut engine = ctx.engine();
        board_train(&mut engine)?;
        engine.dispatch(PageAction::Game(GameAction::TypeReflection("typed first".into())));
        let out = engine.dispatch(PageAction::Game(GameAction::RecordReflection(clip.clone())));
        ensure!(
            out.has_notice(NOTICE_TRANSCRIBE_EMPTY),
            "offline recording should come back empty"
        );
        ensure!(
            engine.state().reflection_current == "typed first",
            "empty transcript overwrote the reflection"
        );

        let transcript = "calmer after the ride";
        let collaborators = ctx
            .offline_collaborators()
            .with_transcriber(ScriptedTranscriber(format!("  {transcript} ")));
        let mut engine = ctx.engine_with(collaborators);
        board_train(&mut engine)?;
        engine.dispatch(PageAction::Game(GameAction::TypeReflection("typed first".into())));
        let out = engine.dispatch(PageAction::Game(GameAction::RecordReflection(clip)));
        ensure!(out.has_notice(NOTICE_TRANSCRIBED), "transcript not accepted");
        ensure!(
            engine.state().reflection_current == transcript
                && engine.state().reflection_original == transcript,
            "latest transcript should replace the typed reflection"
        );

        engine.dispatch(PageAction::Game(GameAction::TypeReflection("   ".into())));
        ensure!(
            engine.state().reflection_current == transcript,
            "blank input replaced the reflection"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::TesterAssets;

    #[test]
    fn chat_scenarios_pass_on_bundled_config() {
        let assets = TesterAssets::load_default();
        let ctx = LogicCtx {
            assets: &assets,
            seed: 3,
        };
        CrisisReplyScenario.run_logic(&ctx).unwrap();
        CollaboratorOutageScenario.run_logic(&ctx).unwrap();
        VoiceReflectionScenario.run_logic(&ctx).unwrap();
    }

    #[test]
    fn crisis_check_fails_without_the_phrase() {
        let mut assets = TesterAssets::load_default();
        assets.config.chat.crisis_phrases.retain(|p| p != "hopeless");
        let ctx = LogicCtx {
            assets: &assets,
            seed: 3,
        };
        let err = CrisisReplyScenario.run_logic(&ctx).unwrap_err();
        assert!(err.to_string().contains("crisis phrase not detected"));
    }

    #[test]
    fn chat_scenarios_are_logic_only() {
        assert!(!CrisisReplyScenario.has_browser());
        assert!(!CollaboratorOutageScenario.has_browser());
        assert!(!VoiceReflectionScenario.has_browser());
    }
}
