//! Integration tests for the chat widget controller
//!
//! Drives the submit cycle, panel toggling and suggestion handling against a
//! recording view double and stubbed transports.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vitae::types::{ChatMessage, Role};
use vitae::widget::{
    ChatTransport, ChatWidget, FALLBACK_ERROR_TEXT, PLACEHOLDER_TEXT, SubmitOutcome,
    TransportError, WidgetView,
};

#[derive(Clone, Debug, PartialEq)]
enum ViewEvent {
    Appended(Role, String),
    Removed,
    PanelHidden(bool),
    TriggerHidden(bool),
    InputCleared,
    ComposerEnabled(bool),
    SuggestionsHidden,
}

/// View double that records every call the controller makes.
#[derive(Clone, Default)]
struct RecordingView {
    events: Arc<Mutex<Vec<ViewEvent>>>,
}

impl RecordingView {
    fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().expect("view events lock").clone()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().expect("view events lock").push(event);
    }
}

impl WidgetView for RecordingView {
    fn message_appended(&mut self, message: &ChatMessage) {
        self.push(ViewEvent::Appended(message.role, message.content.clone()));
    }

    fn last_message_removed(&mut self) {
        self.push(ViewEvent::Removed);
    }

    fn set_panel_hidden(&mut self, hidden: bool) {
        self.push(ViewEvent::PanelHidden(hidden));
    }

    fn set_trigger_hidden(&mut self, hidden: bool) {
        self.push(ViewEvent::TriggerHidden(hidden));
    }

    fn clear_input(&mut self) {
        self.push(ViewEvent::InputCleared);
    }

    fn set_composer_enabled(&mut self, enabled: bool) {
        self.push(ViewEvent::ComposerEnabled(enabled));
    }

    fn hide_suggestions(&mut self) {
        self.push(ViewEvent::SuggestionsHidden);
    }
}

struct StaticTransport(&'static str);

#[async_trait]
impl ChatTransport for StaticTransport {
    async fn send(&self, _message: &str) -> Result<String, TransportError> {
        Ok(self.0.to_string())
    }
}

struct FailingTransport;

#[async_trait]
impl ChatTransport for FailingTransport {
    async fn send(&self, _message: &str) -> Result<String, TransportError> {
        Err(TransportError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        })
    }
}

/// Records every payload that actually went out.
#[derive(Clone)]
struct CapturingTransport {
    sent: Arc<Mutex<Vec<String>>>,
    reply: &'static str,
}

impl CapturingTransport {
    fn new(reply: &'static str) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            reply,
        }
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().expect("sent lock").clone()
    }
}

#[async_trait]
impl ChatTransport for CapturingTransport {
    async fn send(&self, message: &str) -> Result<String, TransportError> {
        self.sent.lock().expect("sent lock").push(message.to_string());
        Ok(self.reply.to_string())
    }
}

fn placeholder_count(messages: &[ChatMessage]) -> usize {
    messages
        .iter()
        .filter(|m| m.role == Role::Assistant && m.content == PLACEHOLDER_TEXT)
        .count()
}

mod submit_tests {
    use super::*;

    #[tokio::test]
    async fn empty_input_is_silently_ignored() {
        let view = RecordingView::default();
        let transport = CapturingTransport::new("unused");
        let mut widget = ChatWidget::new(view.clone(), transport.clone());

        assert_eq!(widget.submit("").await, SubmitOutcome::Ignored);
        assert_eq!(widget.submit("   \t  ").await, SubmitOutcome::Ignored);

        assert!(widget.messages().is_empty());
        assert!(view.events().is_empty());
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn user_message_lands_before_the_request() {
        let view = RecordingView::default();
        let transport = CapturingTransport::new("the reply");
        let mut widget = ChatWidget::new(view.clone(), transport.clone());

        let outcome = widget.submit("  What does he work with?  ").await;

        assert_eq!(outcome, SubmitOutcome::Replied);
        assert_eq!(transport.sent(), vec!["What does he work with?".to_string()]);
        assert_eq!(
            view.events(),
            vec![
                ViewEvent::Appended(Role::User, "What does he work with?".to_string()),
                ViewEvent::InputCleared,
                ViewEvent::ComposerEnabled(false),
                ViewEvent::Appended(Role::Assistant, PLACEHOLDER_TEXT.to_string()),
                ViewEvent::Removed,
                ViewEvent::Appended(Role::Assistant, "the reply".to_string()),
                ViewEvent::ComposerEnabled(true),
            ]
        );
    }

    #[tokio::test]
    async fn successful_reply_replaces_the_placeholder() {
        let view = RecordingView::default();
        let mut widget = ChatWidget::new(view, StaticTransport("X"));

        widget.submit("question").await;

        let messages = widget.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "X");
        assert_eq!(placeholder_count(messages), 0);
    }

    #[tokio::test]
    async fn failure_appends_the_fixed_fallback_only() {
        let view = RecordingView::default();
        let mut widget = ChatWidget::new(view.clone(), FailingTransport);

        let outcome = widget.submit("question").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        let last = widget.messages().last().expect("fallback appended");
        assert_eq!(last.content, FALLBACK_ERROR_TEXT);
        assert_eq!(placeholder_count(widget.messages()), 0);
        // transport details never reach the rendered log
        assert!(!last.content.contains("500"));
        assert!(view.events().contains(&ViewEvent::ComposerEnabled(true)));
    }

    #[tokio::test]
    async fn exactly_one_placeholder_while_pending() {
        let view = RecordingView::default();
        let mut widget = ChatWidget::new(view, StaticTransport("done"));

        let payload = widget.begin_turn("question");
        assert_eq!(payload, Some("question".to_string()));
        assert!(widget.is_busy());
        assert_eq!(placeholder_count(widget.messages()), 1);

        // a second turn cannot start while the first is pending
        assert_eq!(widget.begin_turn("another"), None);
        assert_eq!(placeholder_count(widget.messages()), 1);
        assert_eq!(widget.messages().len(), 2);

        let outcome = widget.complete_turn(Ok("done".to_string()));
        assert_eq!(outcome, SubmitOutcome::Replied);
        assert!(!widget.is_busy());
        assert_eq!(placeholder_count(widget.messages()), 0);
    }

    #[tokio::test]
    async fn submission_while_pending_reports_busy() {
        let view = RecordingView::default();
        let transport = CapturingTransport::new("late reply");
        let mut widget = ChatWidget::new(view, transport.clone());

        let _ = widget.begin_turn("first");
        assert_eq!(widget.submit("second").await, SubmitOutcome::Busy);
        assert!(transport.sent().is_empty());

        widget.complete_turn(Ok("first reply".to_string()));
        assert_eq!(widget.submit("second").await, SubmitOutcome::Replied);
        assert_eq!(transport.sent(), vec!["second".to_string()]);
    }
}

mod panel_tests {
    use super::*;

    #[tokio::test]
    async fn toggle_round_trip_restores_the_trigger() {
        let view = RecordingView::default();
        let mut widget = ChatWidget::new(view.clone(), StaticTransport(""));

        assert!(!widget.is_open());

        widget.toggle();
        assert!(widget.is_open());

        widget.toggle();
        assert!(!widget.is_open());

        assert_eq!(
            view.events(),
            vec![
                ViewEvent::PanelHidden(false),
                ViewEvent::TriggerHidden(true),
                ViewEvent::PanelHidden(true),
                ViewEvent::TriggerHidden(false),
            ]
        );
    }

    #[tokio::test]
    async fn reopening_is_idempotent() {
        let view = RecordingView::default();
        let mut widget = ChatWidget::new(view.clone(), StaticTransport(""));

        widget.open();
        widget.open();

        assert!(widget.is_open());
        assert_eq!(view.events().len(), 2);
    }
}

mod suggestion_tests {
    use super::*;

    fn canned() -> Vec<String> {
        vec![
            "What is his experience?".to_string(),
            "What stack does he use?".to_string(),
        ]
    }

    #[tokio::test]
    async fn choosing_a_suggestion_submits_its_text() {
        let view = RecordingView::default();
        let transport = CapturingTransport::new("a reply");
        let mut widget = ChatWidget::with_suggestions(view.clone(), transport.clone(), canned());

        let outcome = widget.choose_suggestion(0).await;

        assert_eq!(outcome, SubmitOutcome::Replied);
        assert_eq!(transport.sent(), vec!["What is his experience?".to_string()]);
        assert_eq!(widget.messages()[0].role, Role::User);
        assert_eq!(widget.messages()[0].content, "What is his experience?");
        assert!(widget.suggestions_consumed());
        assert!(view.events().contains(&ViewEvent::SuggestionsHidden));
    }

    #[tokio::test]
    async fn suggestions_hide_once_globally() {
        let view = RecordingView::default();
        let transport = CapturingTransport::new("a reply");
        let mut widget = ChatWidget::with_suggestions(view.clone(), transport.clone(), canned());

        widget.choose_suggestion(0).await;
        widget.choose_suggestion(1).await;

        let hides = view
            .events()
            .iter()
            .filter(|e| **e == ViewEvent::SuggestionsHidden)
            .count();
        assert_eq!(hides, 1);
        assert_eq!(transport.sent().len(), 2);
    }

    #[tokio::test]
    async fn unknown_suggestion_index_is_ignored() {
        let view = RecordingView::default();
        let transport = CapturingTransport::new("unused");
        let mut widget = ChatWidget::with_suggestions(view.clone(), transport.clone(), canned());

        assert_eq!(widget.choose_suggestion(5).await, SubmitOutcome::Ignored);
        assert!(transport.sent().is_empty());
        assert_eq!(widget.suggestions().len(), 2);
        assert!(!widget.suggestions_consumed());
    }

    #[tokio::test]
    async fn busy_widget_keeps_suggestions_visible() {
        let view = RecordingView::default();
        let transport = CapturingTransport::new("unused");
        let mut widget = ChatWidget::with_suggestions(view.clone(), transport.clone(), canned());

        let _ = widget.begin_turn("typed question");
        assert_eq!(widget.choose_suggestion(0).await, SubmitOutcome::Busy);

        assert!(!widget.suggestions_consumed());
        assert!(!view.events().contains(&ViewEvent::SuggestionsHidden));
    }
}
