use crate::types::{ChatMessage, Role};

use super::{ChatTransport, TransportError, WidgetView};

/// Transient assistant entry shown while a reply is pending.
pub const PLACEHOLDER_TEXT: &str = "…";

/// Fixed user-safe text appended when a turn fails. Transport details never
/// reach the rendered log.
pub const FALLBACK_ERROR_TEXT: &str =
    "Sorry, something went wrong while answering your question. Please try again.";

/// What a submission did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty or whitespace-only input; no message, no request.
    Ignored,
    /// A turn was already in flight; no message, no request.
    Busy,
    /// The endpoint answered and the reply was appended.
    Replied,
    /// The turn failed and the fallback message was appended.
    Failed,
}

/// Chat widget state machine.
///
/// The message log is the single source of truth for what is displayed; every
/// change flows out through the [`WidgetView`] as it happens. One conversation
/// turn is in flight at a time: while a turn is pending the composer is
/// disabled and further submissions are ignored.
pub struct ChatWidget<V: WidgetView, T: ChatTransport> {
    view: V,
    transport: T,
    messages: Vec<ChatMessage>,
    suggestions: Vec<String>,
    suggestions_consumed: bool,
    open: bool,
    busy: bool,
}

impl<V: WidgetView, T: ChatTransport> ChatWidget<V, T> {
    pub fn new(view: V, transport: T) -> Self {
        Self::with_suggestions(view, transport, Vec::new())
    }

    pub fn with_suggestions(view: V, transport: T, suggestions: Vec<String>) -> Self {
        Self {
            view,
            transport,
            messages: Vec::new(),
            suggestions,
            suggestions_consumed: false,
            open: false,
            busy: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn suggestions_consumed(&self) -> bool {
        self.suggestions_consumed
    }

    /// Reveals the panel and hides the trigger affordance. Both page triggers
    /// (floating and nav) route here.
    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.view.set_panel_hidden(false);
        self.view.set_trigger_hidden(true);
    }

    /// Hides the panel and restores the trigger.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.view.set_panel_hidden(true);
        self.view.set_trigger_hidden(false);
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Full submit cycle: validate, start the turn, send, apply the result.
    pub async fn submit(&mut self, input: &str) -> SubmitOutcome {
        let text = input.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }
        if self.busy {
            tracing::debug!("ignoring submission while a turn is in flight");
            return SubmitOutcome::Busy;
        }

        let Some(payload) = self.begin_turn(text) else {
            return SubmitOutcome::Ignored;
        };
        let result = self.transport.send(&payload).await;
        self.complete_turn(result)
    }

    /// Behaves exactly like typing the suggestion text and submitting it, and
    /// additionally hides the whole suggestion set on first use. A busy widget
    /// ignores the selection without consuming the suggestions.
    pub async fn choose_suggestion(&mut self, index: usize) -> SubmitOutcome {
        let Some(text) = self.suggestions.get(index).cloned() else {
            return SubmitOutcome::Ignored;
        };
        if text.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }
        if self.busy {
            tracing::debug!("ignoring suggestion while a turn is in flight");
            return SubmitOutcome::Busy;
        }

        if !self.suggestions_consumed {
            self.suggestions_consumed = true;
            self.view.hide_suggestions();
        }
        self.submit(&text).await
    }

    /// Starts a conversation turn: appends the user message, clears the
    /// input, disables the composer and appends the placeholder — strictly
    /// before the request leaves. Returns the payload to send, or `None` when
    /// the input is empty or a turn is already pending.
    ///
    /// Event-loop embedders call this on the submit event, dispatch the
    /// transport request themselves, and hand the result to
    /// [`Self::complete_turn`].
    pub fn begin_turn(&mut self, input: &str) -> Option<String> {
        let text = input.trim();
        if text.is_empty() || self.busy {
            return None;
        }

        self.append(ChatMessage::user(text));
        self.view.clear_input();

        self.busy = true;
        self.view.set_composer_enabled(false);
        self.append(ChatMessage::assistant(PLACEHOLDER_TEXT));

        Some(text.to_string())
    }

    /// Applies a finished turn: retracts the placeholder — strictly before
    /// the final entry lands — then appends the reply or the fixed fallback
    /// and re-enables the composer.
    pub fn complete_turn(&mut self, result: Result<String, TransportError>) -> SubmitOutcome {
        if !self.busy {
            return SubmitOutcome::Ignored;
        }

        self.retract_placeholder();

        let outcome = match result {
            Ok(reply) => {
                self.append(ChatMessage::assistant(reply));
                SubmitOutcome::Replied
            }
            Err(err) => {
                tracing::error!(error = %err, "chat turn failed");
                self.append(ChatMessage::assistant(FALLBACK_ERROR_TEXT));
                SubmitOutcome::Failed
            }
        };

        self.busy = false;
        self.view.set_composer_enabled(true);
        outcome
    }

    fn append(&mut self, message: ChatMessage) {
        self.view.message_appended(&message);
        self.messages.push(message);
    }

    fn retract_placeholder(&mut self) {
        let is_placeholder = matches!(
            self.messages.last(),
            Some(last) if last.role == Role::Assistant && last.content == PLACEHOLDER_TEXT
        );
        if is_placeholder {
            self.messages.pop();
            self.view.last_message_removed();
        }
    }
}
