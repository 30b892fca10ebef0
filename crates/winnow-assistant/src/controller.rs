//! Assistant session controller: the coordinator of both input modalities
//! and both output modalities.
//!
//! All methods take `&self` and are meant to be driven from one cooperative
//! control loop. The guards of `submit` and `toggle_mic` run synchronously
//! before the first suspension point, so two submissions polled back to back
//! can never both be accepted.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{broadcast, watch, Notify};
use uuid::Uuid;

use winnow_core::config::WinnowConfig;
use winnow_core::events::{AssistantEvent, NotificationLevel};
use winnow_core::types::{Role, SessionStatus, Timestamp, Turn, TurnId};
use winnow_speech::{SpeechError, SpeechInputSession, SpeechOutputChannel, TranscriptEvent};

use crate::client::{ChatBackend, TransportFailure};
use crate::error::AssistantError;
use crate::language::{Language, LanguageRegistry};
use crate::log::ConversationLog;
use crate::status::StatusTracker;
use crate::types::{ChatReply, ChatRequest, ExchangeOutcome, MicState, SpeechUpdate};

/// Prefix of assistant turns that record a failed exchange.
pub const FAILURE_MARKER: &str = "❌";

const EVENT_CAPACITY: usize = 64;

/// Controller settings, normally derived from [`WinnowConfig`].
#[derive(Debug, Clone)]
pub struct AssistantSettings {
    /// Initial locale code.
    pub language: String,
    pub muted: bool,
    /// Ceiling for one chat call.
    pub request_timeout: Duration,
    pub greeting: String,
    pub quick_prompts: Vec<String>,
}

impl AssistantSettings {
    pub fn from_config(config: &WinnowConfig) -> Self {
        Self {
            language: config.assistant.default_language.clone(),
            muted: config.assistant.muted,
            request_timeout: config.backend.timeout(),
            greeting: config.assistant.greeting.clone(),
            quick_prompts: config.assistant.quick_prompts.clone(),
        }
    }
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self::from_config(&WinnowConfig::default())
    }
}

struct ControllerState {
    language: String,
    staging: String,
    /// Recognition whose transcript events are currently accepted.
    mic_session: Option<Uuid>,
}

pub struct AssistantController {
    backend: Arc<dyn ChatBackend>,
    log: ConversationLog,
    input: SpeechInputSession,
    output: SpeechOutputChannel,
    status: StatusTracker,
    state: Mutex<ControllerState>,
    events: broadcast::Sender<AssistantEvent>,
    mic_started: Notify,
    settings: AssistantSettings,
}

impl std::fmt::Debug for AssistantController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantController")
            .field("status", &self.status.current())
            .field("turns", &self.log.len())
            .field("input", &self.input)
            .field("output", &self.output)
            .finish()
    }
}

impl AssistantController {
    /// Create a controller in `Idle`.
    ///
    /// Fails with `UnknownLanguage` if the configured language is not in the
    /// registry.
    pub fn new(
        settings: AssistantSettings,
        backend: Arc<dyn ChatBackend>,
        input: SpeechInputSession,
        output: SpeechOutputChannel,
    ) -> Result<Self, AssistantError> {
        LanguageRegistry::resolve(&settings.language)?;
        output.set_muted(settings.muted);
        let (events, _rx) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            backend,
            log: ConversationLog::new(),
            input,
            output,
            status: StatusTracker::new(),
            state: Mutex::new(ControllerState {
                language: settings.language.clone(),
                staging: String::new(),
                mic_session: None,
            }),
            events,
            mic_started: Notify::new(),
            settings,
        })
    }

    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: AssistantEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn notify(&self, level: NotificationLevel, message: impl Into<String>) {
        self.emit(AssistantEvent::notification(level, message));
    }

    fn transition(&self, to: SessionStatus) -> Result<(), AssistantError> {
        let from = self.status.transition(to)?;
        self.emit(AssistantEvent::StatusChanged {
            from,
            to,
            timestamp: Timestamp::now(),
        });
        Ok(())
    }

    fn turn_appended(&self, turn_id: TurnId, role: Role) {
        self.emit(AssistantEvent::TurnAppended {
            turn_id,
            role,
            timestamp: Timestamp::now(),
        });
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn status(&self) -> SessionStatus {
        self.status.current()
    }

    /// Observable status for the UI.
    pub fn watch_status(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// Stream of assistant events (turns, status, notifications, ...).
    pub fn subscribe(&self) -> broadcast::Receiver<AssistantEvent> {
        self.events.subscribe()
    }

    /// Read-only copy of the conversation.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.log.snapshot()
    }

    pub fn language(&self) -> String {
        self.lock_state().language.clone()
    }

    pub fn languages(&self) -> &'static [Language] {
        LanguageRegistry::list()
    }

    pub fn is_muted(&self) -> bool {
        self.output.is_muted()
    }

    pub fn greeting(&self) -> &str {
        &self.settings.greeting
    }

    pub fn quick_prompts(&self) -> &[String] {
        &self.settings.quick_prompts
    }

    /// Current contents of the staging buffer.
    pub fn staging(&self) -> String {
        self.lock_state().staging.clone()
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Replace the staging buffer with user-edited text.
    pub fn set_staging(&self, text: &str) {
        self.lock_state().staging = text.to_string();
    }

    /// Select the language for future recognitions, requests and speech.
    ///
    /// A recognition already running keeps its locale until restarted.
    pub fn set_language(&self, code: &str) -> Result<(), AssistantError> {
        LanguageRegistry::resolve(code)?;
        let mut state = self.lock_state();
        if state.language != code {
            state.language = code.to_string();
            tracing::info!(language = code, "Assistant language changed");
            self.emit(AssistantEvent::LanguageChanged {
                code: code.to_string(),
                timestamp: Timestamp::now(),
            });
        }
        Ok(())
    }

    pub fn set_muted(&self, muted: bool) {
        if self.output.is_muted() != muted {
            self.output.set_muted(muted);
            self.emit(AssistantEvent::MuteChanged {
                muted,
                timestamp: Timestamp::now(),
            });
        }
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Submit `text` to the chat backend in the current language.
    ///
    /// Rejected with `AlreadyInFlight` while another request is outstanding
    /// and with `EmptyInput` for blank text; neither rejection has side
    /// effects. Once accepted, every outcome, including transport failures,
    /// is recorded in the log and the call returns `Ok`.
    pub async fn submit(&self, text: &str) -> Result<ExchangeOutcome, AssistantError> {
        let (request, locale, user_turn) = {
            let mut state = self.lock_state();
            if self.status.current() == SessionStatus::Sending {
                tracing::debug!("Submission rejected: request already in flight");
                return Err(AssistantError::AlreadyInFlight);
            }
            let prompt = text.trim();
            if prompt.is_empty() {
                return Err(AssistantError::EmptyInput);
            }
            let language = LanguageRegistry::resolve(&state.language)?;

            // The dictated text is the submission now.
            if self.status.current() == SessionStatus::Listening {
                self.input.stop();
                state.mic_session = None;
            }
            state.staging.clear();

            let user_turn = self.log.append_user(prompt)?;
            self.turn_appended(user_turn, Role::User);
            self.transition(SessionStatus::Sending)?;

            let request = ChatRequest {
                message: prompt.to_string(),
                language: language.to_string(),
            };
            (request, state.language.clone(), user_turn)
        };

        tracing::info!(
            turn_id = %user_turn,
            language = %request.language,
            "Submitting chat request"
        );
        let pending = PendingExchange {
            controller: self,
            user_turn,
            locale,
            settled: false,
        };
        let result = match tokio::time::timeout(
            self.settings.request_timeout,
            self.backend.send(&request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(TransportFailure::Timeout {
                after: self.settings.request_timeout,
            }),
        };
        pending.settle(result)
    }

    /// Submit whatever is in the staging buffer.
    pub async fn submit_staged(&self) -> Result<ExchangeOutcome, AssistantError> {
        let text = self.staging();
        self.submit(&text).await
    }

    /// Submit one of the fixed quick prompts.
    pub async fn submit_quick_prompt(
        &self,
        index: usize,
    ) -> Result<ExchangeOutcome, AssistantError> {
        let prompt = self
            .settings
            .quick_prompts
            .get(index)
            .cloned()
            .ok_or(AssistantError::UnknownQuickPrompt(index))?;
        self.submit(&prompt).await
    }

    fn finish_exchange(
        &self,
        user_turn: TurnId,
        locale: &str,
        result: Result<ChatReply, TransportFailure>,
    ) -> Result<ExchangeOutcome, AssistantError> {
        let _state = self.lock_state();
        match result {
            Ok(ChatReply { reply }) => {
                let assistant_turn = self.log.append_assistant(user_turn, &reply)?;
                self.turn_appended(assistant_turn, Role::Assistant);
                let spoken = self.output.speak(&reply, locale);
                self.transition(SessionStatus::Idle)?;
                tracing::info!(turn_id = %assistant_turn, spoken, "Chat reply recorded");
                Ok(ExchangeOutcome::Replied {
                    user_turn,
                    assistant_turn,
                    reply,
                    spoken,
                })
            }
            Err(failure) => {
                tracing::warn!(turn_id = %user_turn, error = %failure, "Chat request failed");
                let diagnostic = failure.diagnostic();
                let text = format!("{} {}", FAILURE_MARKER, diagnostic);
                let assistant_turn = self.log.append_assistant(user_turn, &text)?;
                self.turn_appended(assistant_turn, Role::Assistant);
                self.notify(NotificationLevel::Error, "AI failed");
                self.transition(SessionStatus::Error)?;
                self.transition(SessionStatus::Idle)?;
                Ok(ExchangeOutcome::Failed {
                    user_turn,
                    assistant_turn,
                    diagnostic,
                })
            }
        }
    }

    // =========================================================================
    // Voice input
    // =========================================================================

    /// Turn the microphone on or off.
    ///
    /// Turning it off discards the unsubmitted transcript. Turning it on
    /// clears the staging buffer and starts a recognition in the current
    /// language.
    pub fn toggle_mic(&self) -> Result<MicState, AssistantError> {
        let mut state = self.lock_state();
        match self.status.current() {
            SessionStatus::Sending => Err(AssistantError::AlreadyInFlight),
            SessionStatus::Listening => {
                self.input.stop();
                state.mic_session = None;
                state.staging.clear();
                self.transition(SessionStatus::Idle)?;
                Ok(MicState::Off)
            }
            SessionStatus::Error => Err(AssistantError::InvalidTransition {
                from: SessionStatus::Error,
                to: SessionStatus::Listening,
            }),
            SessionStatus::Idle => {
                let session = match self.input.start(&state.language) {
                    Ok(session) => session,
                    Err(err) => {
                        let message = match &err {
                            SpeechError::UnsupportedCapability(_) => {
                                "Speech recognition not supported".to_string()
                            }
                            SpeechError::Platform(cause) => {
                                format!("Voice recognition failed: {}", cause)
                            }
                        };
                        tracing::warn!(error = %err, "Could not start speech input");
                        self.notify(NotificationLevel::Error, message);
                        return Err(err.into());
                    }
                };
                state.mic_session = Some(session);
                state.staging.clear();
                self.transition(SessionStatus::Listening)?;
                drop(state);
                self.mic_started.notify_waiters();
                Ok(MicState::On)
            }
        }
    }

    /// Wait for the next transcript event and apply it.
    ///
    /// Events from recognitions the controller no longer listens to are
    /// dropped. While the mic is off this waits until it is turned on.
    pub async fn next_speech_update(&self) -> SpeechUpdate {
        loop {
            let started = self.mic_started.notified();
            match self.input.next_event().await {
                Some(event) => {
                    if let Some(update) = self.apply_transcript_event(event) {
                        return update;
                    }
                }
                None => started.await,
            }
        }
    }

    fn apply_transcript_event(&self, event: TranscriptEvent) -> Option<SpeechUpdate> {
        let mut state = self.lock_state();
        if self.status.current() != SessionStatus::Listening
            || state.mic_session != Some(event.session())
        {
            tracing::debug!(session_id = %event.session(), "Dropping stale transcript event");
            return None;
        }

        match event {
            TranscriptEvent::Partial { transcript, .. } => {
                state.staging = transcript.clone();
                self.emit(AssistantEvent::TranscriptUpdated {
                    text: transcript.clone(),
                    timestamp: Timestamp::now(),
                });
                Some(SpeechUpdate::Transcript(transcript))
            }
            TranscriptEvent::Completed { transcript, .. } => {
                state.mic_session = None;
                if let Err(e) = self.transition(SessionStatus::Idle) {
                    tracing::error!(error = %e, "Failed to leave Listening");
                }
                Some(SpeechUpdate::Ended { transcript })
            }
            TranscriptEvent::Failed { cause, .. } => {
                state.mic_session = None;
                if let Err(e) = self.transition(SessionStatus::Idle) {
                    tracing::error!(error = %e, "Failed to leave Listening");
                }
                self.notify(
                    NotificationLevel::Error,
                    format!("Voice recognition failed: {}", cause),
                );
                Some(SpeechUpdate::Failed { cause })
            }
        }
    }
}

/// An accepted submission awaiting its reply.
///
/// If the submitting future is dropped before the reply arrives, the
/// exchange is closed as cancelled so the log keeps alternating and the
/// status returns to `Idle`.
struct PendingExchange<'a> {
    controller: &'a AssistantController,
    user_turn: TurnId,
    locale: String,
    settled: bool,
}

impl PendingExchange<'_> {
    fn settle(
        mut self,
        result: Result<ChatReply, TransportFailure>,
    ) -> Result<ExchangeOutcome, AssistantError> {
        self.settled = true;
        self.controller
            .finish_exchange(self.user_turn, &self.locale, result)
    }
}

impl Drop for PendingExchange<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Err(e) = self.controller.finish_exchange(
            self.user_turn,
            &self.locale,
            Err(TransportFailure::Cancelled),
        ) {
            tracing::error!(error = %e, "Failed to close cancelled exchange");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use winnow_speech::mock::{MockRecognizer, MockSynthesizer};
    use winnow_speech::{SpeechRecognizer, SpeechSynthesizer, VoiceParams};

    struct EchoBackend;

    #[async_trait]
    impl ChatBackend for EchoBackend {
        async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportFailure> {
            Ok(ChatReply {
                reply: format!("[{}] {}", request.language, request.message),
            })
        }
    }

    struct StalledBackend;

    #[async_trait]
    impl ChatBackend for StalledBackend {
        async fn send(&self, _request: &ChatRequest) -> Result<ChatReply, TransportFailure> {
            std::future::pending().await
        }
    }

    fn controller_with(
        backend: Arc<dyn ChatBackend>,
        recognizer: &Arc<MockRecognizer>,
        synth: &Arc<MockSynthesizer>,
    ) -> AssistantController {
        AssistantController::new(
            AssistantSettings {
                request_timeout: Duration::from_millis(50),
                ..AssistantSettings::default()
            },
            backend,
            SpeechInputSession::new(Some(Arc::clone(recognizer) as Arc<dyn SpeechRecognizer>)),
            SpeechOutputChannel::new(
                Some(Arc::clone(synth) as Arc<dyn SpeechSynthesizer>),
                VoiceParams::default(),
            ),
        )
        .unwrap()
    }

    fn echo_controller() -> (AssistantController, Arc<MockRecognizer>, Arc<MockSynthesizer>) {
        let recognizer = Arc::new(MockRecognizer::new());
        let synth = Arc::new(MockSynthesizer::new());
        let controller = controller_with(Arc::new(EchoBackend), &recognizer, &synth);
        (controller, recognizer, synth)
    }

    #[test]
    fn test_new_rejects_unknown_language() {
        let err = AssistantController::new(
            AssistantSettings {
                language: "xx-XX".into(),
                ..AssistantSettings::default()
            },
            Arc::new(EchoBackend),
            SpeechInputSession::unsupported(),
            SpeechOutputChannel::silent(),
        )
        .unwrap_err();
        assert_eq!(err, AssistantError::UnknownLanguage("xx-XX".into()));
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = WinnowConfig::default();
        config.assistant.default_language = "ml-IN".into();
        config.assistant.muted = true;
        config.backend.timeout_secs = 7;
        let settings = AssistantSettings::from_config(&config);
        assert_eq!(settings.language, "ml-IN");
        assert!(settings.muted);
        assert_eq!(settings.request_timeout, Duration::from_secs(7));
        assert_eq!(settings.quick_prompts.len(), 3);
    }

    #[tokio::test]
    async fn test_submit_sends_display_name_and_speaks_in_locale() {
        let (controller, _recognizer, synth) = echo_controller();
        controller.set_language("hi-IN").unwrap();

        let outcome = controller.submit("  sales today  ").await.unwrap();
        match outcome {
            ExchangeOutcome::Replied { reply, spoken, .. } => {
                assert_eq!(reply, "[हिन्दी (Hindi)] sales today");
                assert!(spoken);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        let spoken = synth.spoken();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].locale, "hi-IN");

        let turns = controller.snapshot();
        assert_eq!(turns[0].text, "sales today");
        assert_eq!(controller.status(), SessionStatus::Idle);
    }

    #[tokio::test]
    async fn test_timeout_is_recorded_as_failure_turn() {
        let recognizer = Arc::new(MockRecognizer::new());
        let synth = Arc::new(MockSynthesizer::new());
        let controller = controller_with(Arc::new(StalledBackend), &recognizer, &synth);

        let outcome = controller.submit("anyone there?").await.unwrap();
        assert!(outcome.is_failure());
        let turns = controller.snapshot();
        assert_eq!(turns.len(), 2);
        assert!(turns[1].text.starts_with(FAILURE_MARKER));
        assert!(turns[1].text.contains("timed out"));
        assert_eq!(controller.status(), SessionStatus::Idle);
        assert!(synth.spoken().is_empty());
    }

    #[tokio::test]
    async fn test_dropped_submission_closes_exchange() {
        let recognizer = Arc::new(MockRecognizer::new());
        let synth = Arc::new(MockSynthesizer::new());
        let controller = AssistantController::new(
            AssistantSettings::default(),
            Arc::new(StalledBackend),
            SpeechInputSession::new(Some(recognizer as Arc<dyn SpeechRecognizer>)),
            SpeechOutputChannel::new(Some(synth as Arc<dyn SpeechSynthesizer>), VoiceParams::default()),
        )
        .unwrap();

        tokio::select! {
            _ = controller.submit("never answered") => panic!("stalled backend replied"),
            _ = tokio::task::yield_now() => {}
        }

        let turns = controller.snapshot();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role, Role::Assistant);
        assert!(turns[1].text.contains("cancelled"));
        assert_eq!(controller.status(), SessionStatus::Idle);

        // The controller accepts new work afterwards.
        assert_eq!(
            controller.submit("   ").await.unwrap_err(),
            AssistantError::EmptyInput
        );
    }

    #[tokio::test]
    async fn test_submit_while_listening_stops_recognition() {
        let (controller, recognizer, _synth) = echo_controller();
        controller.toggle_mic().unwrap();
        let sink = recognizer.sink().unwrap();
        sink.interim("waste risk");
        assert_eq!(
            controller.next_speech_update().await,
            SpeechUpdate::Transcript("waste risk".into())
        );
        assert_eq!(controller.staging(), "waste risk");

        let outcome = controller.submit_staged().await.unwrap();
        assert!(!outcome.is_failure());
        assert_eq!(recognizer.abort_count(), 1);
        assert_eq!(controller.staging(), "");
        assert_eq!(controller.snapshot()[0].text, "waste risk");

        // A late result from the stopped recognition changes nothing.
        sink.interim("late words");
        controller.toggle_mic().unwrap();
        let fresh = recognizer.sink().unwrap();
        fresh.interim("fresh");
        assert_eq!(
            controller.next_speech_update().await,
            SpeechUpdate::Transcript("fresh".into())
        );
    }

    #[tokio::test]
    async fn test_toggle_mic_off_discards_transcript() {
        let (controller, recognizer, _synth) = echo_controller();
        assert_eq!(controller.toggle_mic().unwrap(), MicState::On);
        recognizer.sink().unwrap().interim("half a thought");
        controller.next_speech_update().await;
        assert_eq!(controller.staging(), "half a thought");

        assert_eq!(controller.toggle_mic().unwrap(), MicState::Off);
        assert_eq!(controller.staging(), "");
        assert_eq!(controller.status(), SessionStatus::Idle);
        assert!(controller.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_natural_end_keeps_staging_for_editing() {
        let (controller, recognizer, _synth) = echo_controller();
        controller.toggle_mic().unwrap();
        let sink = recognizer.sink().unwrap();
        sink.interim("top items");
        sink.end();

        assert_eq!(
            controller.next_speech_update().await,
            SpeechUpdate::Transcript("top items".into())
        );
        assert_eq!(
            controller.next_speech_update().await,
            SpeechUpdate::Ended {
                transcript: "top items".into()
            }
        );
        assert_eq!(controller.status(), SessionStatus::Idle);
        assert_eq!(controller.staging(), "top items");
        // Never auto-submitted
        assert!(controller.snapshot().is_empty());
    }

    #[test]
    fn test_language_change_does_not_touch_running_recognition() {
        let (controller, recognizer, _synth) = echo_controller();
        controller.toggle_mic().unwrap();
        controller.set_language("ta-IN").unwrap();
        assert_eq!(recognizer.started_locales(), vec!["en-IN"]);

        controller.toggle_mic().unwrap();
        controller.toggle_mic().unwrap();
        assert_eq!(recognizer.started_locales(), vec!["en-IN", "ta-IN"]);
    }

    #[test]
    fn test_set_language_rejects_unknown() {
        let (controller, _recognizer, _synth) = echo_controller();
        assert_eq!(
            controller.set_language("de-DE"),
            Err(AssistantError::UnknownLanguage("de-DE".into()))
        );
        assert_eq!(controller.language(), "en-IN");
    }

    #[tokio::test]
    async fn test_muted_reply_is_not_spoken() {
        let (controller, _recognizer, synth) = echo_controller();
        let mut events = controller.subscribe();
        controller.set_muted(true);
        assert!(controller.is_muted());
        assert!(matches!(
            events.try_recv().unwrap(),
            AssistantEvent::MuteChanged { muted: true, .. }
        ));

        let outcome = controller.submit("quiet please").await.unwrap();
        assert!(matches!(outcome, ExchangeOutcome::Replied { spoken: false, .. }));
        assert!(synth.spoken().is_empty());
        assert_eq!(controller.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_quick_prompt_submission() {
        let (controller, _recognizer, _synth) = echo_controller();
        let first = controller.quick_prompts()[0].clone();
        controller.submit_quick_prompt(0).await.unwrap();
        assert_eq!(controller.snapshot()[0].text, first);

        assert_eq!(
            controller.submit_quick_prompt(42).await.unwrap_err(),
            AssistantError::UnknownQuickPrompt(42)
        );
        assert_eq!(controller.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_next_speech_update_waits_for_mic() {
        let (controller, recognizer, _synth) = echo_controller();
        let (update, _) = tokio::join!(controller.next_speech_update(), async {
            tokio::task::yield_now().await;
            controller.toggle_mic().unwrap();
            recognizer.sink().unwrap().interim("hello");
        });
        assert_eq!(update, SpeechUpdate::Transcript("hello".into()));
    }
}
