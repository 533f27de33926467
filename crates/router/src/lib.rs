//! Conversation routing for Rewaqbot.
//!
//! One inbound text line, one reply string — that is the whole surface the
//! transport sees. Dispatch order:
//!
//! 1. `/start` → static welcome
//! 2. `/help` → static command reference
//! 3. first token `/in` → engine check-in
//! 4. first token `/out` → engine check-out
//! 5. attendance-related free text → structured-commands notice
//! 6. anything else → language-model fallback (fixed apology on failure)
//!
//! The router owns every user-facing string (see [`reply`]); engine outcomes
//! arrive as tags and are rendered here.

pub mod guard;
pub mod reply;

use std::sync::Arc;

use rewaqbot_core::assistant::Assistant;
use rewaqbot_core::command::CommandVerb;
use rewaqbot_engine::AttendanceEngine;
use tracing::{debug, warn};

/// Dispatches inbound lines to the engine or the fallback assistant.
pub struct ConversationRouter {
    engine: AttendanceEngine,
    assistant: Arc<dyn Assistant>,
}

impl ConversationRouter {
    pub fn new(engine: AttendanceEngine, assistant: Arc<dyn Assistant>) -> Self {
        Self { engine, assistant }
    }

    /// Handle one inbound line and produce the reply to send back.
    ///
    /// Never fails: every path, including store and assistant outages, ends
    /// in a reply string.
    pub async fn dispatch(&self, line: &str) -> String {
        let trimmed = line.trim();

        match trimmed {
            "/start" => return reply::WELCOME.to_string(),
            "/help" => return reply::HELP.to_string(),
            _ => {}
        }

        let first_token = trimmed.split_whitespace().next().unwrap_or("");

        if first_token == CommandVerb::CheckIn.token() {
            let outcome = self.engine.check_in(trimmed).await;
            debug!(?outcome, "Check-in dispatched");
            return reply::render(&outcome);
        }

        if first_token == CommandVerb::CheckOut.token() {
            let outcome = self.engine.check_out(trimmed).await;
            debug!(?outcome, "Check-out dispatched");
            return reply::render(&outcome);
        }

        if guard::mentions_attendance(trimmed) {
            debug!("Attendance talk kept away from the model");
            return reply::USE_COMMANDS.to_string();
        }

        match self.assistant.generate_reply(trimmed).await {
            Ok(text) => text,
            Err(e) => {
                warn!(assistant = self.assistant.name(), error = %e, "Fallback call failed");
                reply::ASSISTANT_DOWN.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use rewaqbot_core::clock::FixedClock;
    use rewaqbot_core::error::AssistantError;
    use rewaqbot_core::roster::Participant;
    use rewaqbot_ledger::InMemoryLedger;
    use rewaqbot_roster::Roster;
    use std::sync::Mutex;

    /// Echoes a canned reply and records what reached the model.
    struct ScriptedAssistant {
        reply: String,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedAssistant {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.into(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Assistant for ScriptedAssistant {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate_reply(&self, user_text: &str) -> Result<String, AssistantError> {
            self.calls.lock().unwrap().push(user_text.to_string());
            Ok(self.reply.clone())
        }
    }

    /// An assistant whose upstream is down.
    struct DownAssistant;

    #[async_trait]
    impl Assistant for DownAssistant {
        fn name(&self) -> &str {
            "down"
        }

        async fn generate_reply(&self, _user_text: &str) -> Result<String, AssistantError> {
            Err(AssistantError::Network("connection reset".into()))
        }
    }

    fn router_with(
        assistant: Arc<dyn Assistant>,
        ledger: Arc<InMemoryLedger>,
        hour: u32,
        minute: u32,
    ) -> ConversationRouter {
        let roster = Arc::new(Roster::from_participants(vec![Participant::new(
            "RA-001", "سارة",
        )]));
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, hour, minute, 0).unwrap());
        let engine = AttendanceEngine::new(roster, ledger, Arc::new(clock));
        ConversationRouter::new(engine, assistant)
    }

    #[tokio::test]
    async fn start_and_help_are_static() {
        let router = router_with(
            Arc::new(ScriptedAssistant::new("model reply")),
            Arc::new(InMemoryLedger::new()),
            9,
            0,
        );
        assert_eq!(router.dispatch("/start").await, reply::WELCOME);
        assert_eq!(router.dispatch(" /help ").await, reply::HELP);
    }

    #[tokio::test]
    async fn full_day_scenario() {
        let assistant = Arc::new(ScriptedAssistant::new("model reply"));
        let ledger = Arc::new(InMemoryLedger::new());

        // 09:00 — check in
        let router = router_with(assistant.clone(), ledger.clone(), 9, 0);
        let checked_in = router.dispatch("/in RA-001").await;
        assert!(checked_in.contains("سارة"));
        assert!(checked_in.starts_with('✅'));

        let rows = ledger.snapshot().await;
        assert_eq!(rows.len(), 1);
        assert!(rows[0].check_out.is_none());

        // 13:30 — check out
        let router = router_with(assistant.clone(), ledger.clone(), 13, 30);
        let checked_out = router.dispatch("/out RA-001").await;
        assert!(checked_out.starts_with('✅'));
        assert_eq!(
            ledger.snapshot().await[0].check_out,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 13, 30, 0).unwrap())
        );

        // repeated check out → warning, timestamp untouched
        let again = router.dispatch("/out RA-001").await;
        assert!(again.contains("بالفعل"));
        assert_eq!(
            ledger.snapshot().await[0].check_out,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 13, 30, 0).unwrap())
        );

        // unknown member
        let unknown = router.dispatch("/in RA-002").await;
        assert_eq!(unknown, "❌ هذا المستخدم غير مسجل في رِواق.");

        // none of this reached the model
        assert!(assistant.calls().is_empty());
    }

    #[tokio::test]
    async fn verb_prefix_is_token_exact() {
        let assistant = Arc::new(ScriptedAssistant::new("model reply"));
        let router = router_with(assistant.clone(), Arc::new(InMemoryLedger::new()), 9, 0);

        // "/info" is not "/in" — it goes to the fallback path.
        let replied = router.dispatch("/info please").await;
        assert_eq!(replied, "model reply");
        assert_eq!(assistant.calls(), vec!["/info please".to_string()]);
    }

    #[tokio::test]
    async fn malformed_commands_stay_in_the_engine() {
        let assistant = Arc::new(ScriptedAssistant::new("model reply"));
        let router = router_with(assistant.clone(), Arc::new(InMemoryLedger::new()), 9, 0);

        let replied = router.dispatch("/in").await;
        assert!(replied.starts_with('❌'));
        let replied = router.dispatch("/out one two").await;
        assert!(replied.starts_with('❌'));
        assert!(assistant.calls().is_empty());
    }

    #[tokio::test]
    async fn attendance_talk_never_reaches_the_model() {
        let assistant = Arc::new(ScriptedAssistant::new("model reply"));
        let router = router_with(assistant.clone(), Arc::new(InMemoryLedger::new()), 9, 0);

        let replied = router.dispatch("أريد تسجيل الدخول الآن").await;
        assert_eq!(replied, reply::USE_COMMANDS);
        assert!(assistant.calls().is_empty());
    }

    #[tokio::test]
    async fn free_text_goes_to_the_model() {
        let assistant = Arc::new(ScriptedAssistant::new("نفتح من التاسعة صباحاً"));
        let router = router_with(assistant.clone(), Arc::new(InMemoryLedger::new()), 9, 0);

        let replied = router.dispatch("ما هي ساعات العمل؟").await;
        assert_eq!(replied, "نفتح من التاسعة صباحاً");
        assert_eq!(assistant.calls(), vec!["ما هي ساعات العمل؟".to_string()]);
    }

    #[tokio::test]
    async fn assistant_outage_yields_the_apology() {
        let router = router_with(Arc::new(DownAssistant), Arc::new(InMemoryLedger::new()), 9, 0);
        assert_eq!(router.dispatch("ما هي ساعات العمل؟").await, reply::ASSISTANT_DOWN);
    }
}
